//! REST client for the Bookswap listings backend.
//!
//! Implements [`ListingApi`] over HTTP: a one-shot `GET` of the listing
//! collection and a multipart upload that creates a listing.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookswap_client::{ClientConfig, HttpListingApi};
//! use bookswap_core::ListingApi;
//!
//! let api = HttpListingApi::new(ClientConfig::from_env())?;
//! for listing in api.fetch_listings().await? {
//!     println!("{} by {}", listing.title, listing.author);
//! }
//! ```

pub mod config;

pub use config::{ClientConfig, API_BASE_ENV, DEFAULT_API_BASE};

use async_trait::async_trait;
use bookswap_core::api::{ApiResult, ListingApi};
use bookswap_core::{ApiError, BookswapError, Listing, Submission};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

/// Multipart part carrying the listing JSON
pub const BOOK_PART: &str = "book";

/// Multipart part carrying the photo bytes
pub const PHOTO_PART: &str = "photo";

/// HTTP implementation of [`ListingApi`]
#[derive(Clone)]
pub struct HttpListingApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpListingApi {
    pub fn new(config: ClientConfig) -> bookswap_core::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bookswap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BookswapError::Api(ApiError::Request(e.to_string())))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn upload_form(submission: Submission) -> ApiResult<Form> {
        let json = serde_json::to_string(&submission.payload)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let book = Part::text(json)
            .mime_str("application/json")
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let photo = submission.photo;
        let content_type = if photo.content_type.trim().is_empty() {
            "application/octet-stream".to_string()
        } else {
            photo.content_type
        };
        let photo_part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&content_type)
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Form::new().part(BOOK_PART, book).part(PHOTO_PART, photo_part))
    }
}

#[async_trait]
impl ListingApi for HttpListingApi {
    async fn fetch_listings(&self) -> ApiResult<Vec<Listing>> {
        let url = self.config.books_url();
        tracing::debug!(%url, "Fetching listings");

        let resp = self.client.get(&url).send().await.map_err(transport)?;
        let listings: Vec<Listing> = read_json(resp).await?;

        tracing::debug!(count = listings.len(), "Fetched listings");
        Ok(listings)
    }

    async fn create_listing(&self, submission: Submission) -> ApiResult<Listing> {
        let url = self.config.upload_url();
        tracing::info!(
            %url,
            title = %submission.payload.title,
            photo = %submission.photo.file_name,
            size = submission.photo.len(),
            "Uploading listing"
        );

        let form = Self::upload_form(submission)?;
        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let listing: Listing = read_json(resp).await?;

        tracing::info!(id = %listing.id, "Upload accepted");
        Ok(listing)
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Check the status and decode the body
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: body,
        });
    }

    let bytes = resp.bytes().await.map_err(transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
