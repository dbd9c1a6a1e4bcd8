//! Error types for Bookswap Core

use thiserror::Error;

/// Result type alias using BookswapError
pub type Result<T> = std::result::Result<T, BookswapError>;

/// Top-level error type for all Bookswap operations
#[derive(Debug, Error)]
pub enum BookswapError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Reasons a draft cannot be submitted.
///
/// The display strings are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a photo.")]
    MissingPhoto,

    #[error("Title is required.")]
    MissingTitle,

    #[error("Author is required.")]
    MissingAuthor,

    #[error("Price is required.")]
    MissingPrice,

    #[error("Price cannot be negative.")]
    NegativePrice,

    #[error("Your name is required.")]
    MissingOwnerName,

    #[error("Contact information is required.")]
    MissingContactInfo,
}

/// Errors that occur while mapping raw input events onto the draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Errors that occur during photo normalization
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Selected file is empty: {0}")]
    EmptyFile(String),

    #[error("HEIC decoding is not available in this build")]
    HeicUnsupported,

    #[error("Failed to decode HEIC image: {0}")]
    Decode(String),

    #[error("Failed to encode JPEG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors that occur when talking to the listings backend
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    Request(String),
}
