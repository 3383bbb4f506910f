//! Unified error type for the bass advisor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Too many requests, slow down.")]
    RateLimited,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Weather upstream returned {status}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl Error {
    /// HTTP status code this error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidInput(_) => 400,
            Error::RateLimited => 429,
            _ => 500,
        }
    }
}
