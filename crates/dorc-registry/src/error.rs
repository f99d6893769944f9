//! Error types for registry API calls

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors returned by [`DigitalOceanClient`](crate::DigitalOceanClient)
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The HTTP client could not be constructed
    #[error("could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The API base URL cannot carry path segments
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// A `links.pages.next` link that cannot be followed safely
    #[error("invalid pagination link: {0}")]
    Pagination(String),

    /// Transport failure (connection, TLS, timeout)
    #[error("could not send request: {0}")]
    Http(#[from] reqwest::Error),

    /// Any status other than the one the endpoint acknowledges with
    #[error("unexpected status code: {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("could not decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl RegistryError {
    /// HTTP status for unexpected-status errors
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
