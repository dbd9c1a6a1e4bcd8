//! Backend abstraction for listing reads and uploads

use crate::error::ApiError;
use crate::form::Submission;
use crate::types::{Listing, ListingId};
use async_trait::async_trait;
use std::sync::Mutex;

/// Result type for backend operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The two calls the client makes against the listings backend
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Fetch the full listing collection, in backend order
    async fn fetch_listings(&self) -> ApiResult<Vec<Listing>>;

    /// Upload a validated draft, returning the record the backend created
    async fn create_listing(&self, submission: Submission) -> ApiResult<Listing>;
}

/// In-memory backend (for testing and offline use)
///
/// Assigns sequential numeric ids and photo paths under
/// `/api/v1/books/{id}/photo`, newest first.
#[derive(Default)]
pub struct MemoryListingApi {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    listings: Vec<Listing>,
    next_id: u64,
    fail_fetch: bool,
    fail_upload: bool,
    uploads: Vec<Submission>,
}

impl MemoryListingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing listings
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let api = Self::new();
        {
            let mut state = api.inner.lock().unwrap_or_else(|e| e.into_inner());
            state.next_id = listings.len() as u64;
            state.listings = listings;
        }
        api
    }

    /// Make fetches fail with a transport error
    pub fn fail_fetches(&self, fail: bool) {
        self.state().fail_fetch = fail;
    }

    /// Make uploads fail with a server error
    pub fn fail_uploads(&self, fail: bool) {
        self.state().fail_upload = fail;
    }

    /// Submissions received so far, including failed ones
    pub fn uploads(&self) -> Vec<Submission> {
        self.state().uploads.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ListingApi for MemoryListingApi {
    async fn fetch_listings(&self) -> ApiResult<Vec<Listing>> {
        let state = self.state();
        if state.fail_fetch {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(state.listings.clone())
    }

    async fn create_listing(&self, submission: Submission) -> ApiResult<Listing> {
        let mut state = self.state();
        state.uploads.push(submission.clone());
        if state.fail_upload {
            return Err(ApiError::Status {
                status: 500,
                message: "upload rejected".to_string(),
            });
        }

        state.next_id += 1;
        let id = ListingId::from(state.next_id);
        let photo_url = format!("/api/v1/books/{}/photo", id);
        let listing = submission.payload.into_listing(id, photo_url);
        state.listings.insert(0, listing.clone());
        Ok(listing)
    }
}
