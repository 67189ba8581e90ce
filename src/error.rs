//! error types
//!
//! structured errors for config, transport, protocol, serialization, and
//! paging contract violations.

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for client and paging helpers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// non-2xx response, malformed envelope, or missing data
    #[error("protocol error: {message}")]
    Protocol {
        /// http status if available
        status: Option<u16>,
        /// raw response body
        body: String,
        /// top-level message
        message: String,
    },

    /// the service reported field-level errors alongside (possibly) partial data
    #[error("partial data: {message}")]
    PartialData {
        /// graphql error list
        errors: Vec<GraphQlError>,
        /// first error message
        message: String,
    },

    /// no concrete container is registered for an abstract shape
    #[error("unsupported container type: {0}")]
    UnsupportedType(&'static str),

    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("missing argument: {0}")]
    NullArgument(&'static str),
}

impl Error {
    /// true if the error is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// true if the error looks like anilist rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Protocol { status: Some(429), .. })
            || matches!(self, Error::Transport(err) if err.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS))
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
