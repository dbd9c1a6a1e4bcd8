//! Bookswap Core Library
//!
//! This crate provides the listing types, the submission form, photo
//! normalization and the application model for the Bookswap community book
//! exchange client. It performs no I/O of its own: network access goes
//! through the [`api::ListingApi`] trait, and [`app::App`] returns effects for
//! a runtime to execute.

pub mod api;
pub mod app;
pub mod error;
pub mod form;
pub mod photo;
pub mod store;
pub mod types;
pub mod view;

pub use api::{ApiResult, ListingApi, MemoryListingApi};
pub use app::{App, Effect, Message, Modal, Phase};
pub use error::{ApiError, BookswapError, FormError, ImageError, Result, ValidationError};
pub use form::{DraftId, FieldUpdate, ListingForm, Submission};
pub use photo::{NormalizedPhoto, PhotoNormalizer};
pub use store::ListingStore;
pub use types::{ContactMethod, Listing, ListingId, ListingKind, ListingPayload, PhotoFile, Price};
pub use view::{ContactAction, ListingCard, ListingDetail, PhotoLocator, PriceBadge};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_creation() {
        let app = App::new("http://localhost:8080/api");
        assert!(app.is_loading());
        assert!(app.store().is_empty());
        assert_eq!(app.modal(), &Modal::None);
    }
}
