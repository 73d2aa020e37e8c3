//! Error types for the Tika SDK

use thiserror::Error;

/// Result type alias for Tika SDK operations
pub type Result<T> = std::result::Result<T, TikaError>;

/// Errors that can occur when talking to a Tika server
#[derive(Error, Debug)]
pub enum TikaError {
    /// Missing or unusable endpoint configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The endpoint address is not a valid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Connection or request failure in the HTTP transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than 200 OK.
    ///
    /// `status_line` is the code plus its canonical reason phrase, not the
    /// phrase the server sent; codes without one read
    /// `599 <unknown status code>`.
    #[error("Tika server returned {status_line}")]
    Upstream { status: u16, status_line: String },

    /// Reading the response body failed part way through
    #[error("Failed to read response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl TikaError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        TikaError::Config(message.into())
    }

    /// Get the HTTP status code if the server produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TikaError::Upstream { status, .. } => Some(*status),
            TikaError::Http(err) | TikaError::Decode(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
