//! Backend location

/// Environment variable holding the API base URL
pub const API_BASE_ENV: &str = "BOOKSWAP_API_BASE";

/// Local development backend, used when nothing is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Client configuration: the base URL every endpoint hangs off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: String,
}

impl ClientConfig {
    pub fn new(api_base: impl AsRef<str>) -> Self {
        let trimmed = api_base.as_ref().trim().trim_end_matches('/');
        let api_base = if trimmed.is_empty() {
            DEFAULT_API_BASE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { api_base }
    }

    /// Read `BOOKSWAP_API_BASE`, falling back to the local backend
    pub fn from_env() -> Self {
        match std::env::var(API_BASE_ENV) {
            Ok(base) => Self::new(base),
            Err(_) => Self::default(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `GET` endpoint for the listing collection
    pub fn books_url(&self) -> String {
        format!("{}/v1/books", self.api_base)
    }

    /// `POST` endpoint for multipart listing creation
    pub fn upload_url(&self) -> String {
        format!("{}/v1/books/upload", self.api_base)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}
