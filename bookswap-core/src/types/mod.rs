//! Core data types shared by the client, the view model and the runtime

mod listing;
mod photo;

pub use listing::{ContactMethod, Listing, ListingId, ListingKind, ListingPayload, Price};
pub use photo::PhotoFile;
