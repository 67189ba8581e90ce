//! graphql types
//!
//! wrappers for graphql responses and errors, plus classification of a raw
//! response body into the library error taxonomy.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// graphql response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    /// response data or null if errors
    pub data: Option<T>,
    /// graphql errors array
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// true if the response contains graphql errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// unwrap the data payload, failing on a missing `data` field
    pub fn into_data(self) -> Result<T> {
        self.data.ok_or_else(|| Error::Protocol {
            status: None,
            body: String::new(),
            message: "response contained no data".to_string(),
        })
    }
}

/// graphql error entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    /// error message
    pub message: String,
    /// http-like status reported by anilist inside the error entry
    #[serde(default)]
    pub status: Option<u16>,
    /// error locations in the query
    #[serde(default)]
    pub locations: Vec<GraphQlLocation>,
    /// response path
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// graphql error location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlLocation {
    /// line number (1-based)
    pub line: i64,
    /// column number (1-based)
    pub column: i64,
}

/// classify a raw response body into a parsed envelope or a structured error
///
/// a body that does not parse as a graphql envelope is a protocol error. a
/// non-2xx status is also a protocol error even when the body carries graphql
/// errors — anilist rate limiting reports both, and the http status must stay
/// on the error for [`Error::is_rate_limited`]. graphql errors on a 2xx
/// response surface as [`Error::PartialData`] whether or not a partial `data`
/// payload came along.
pub(crate) fn classify_response<T: DeserializeOwned>(
    status: u16,
    text: String,
) -> Result<GraphQlResponse<T>> {
    let parsed: GraphQlResponse<T> = match serde_json::from_str(&text) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Err(Error::Protocol {
                status: Some(status),
                body: text,
                message: format!("malformed graphql envelope: {err}"),
            })
        }
    };

    if !(200..300).contains(&status) {
        let message = parsed
            .errors
            .first()
            .map(|err| err.message.clone())
            .unwrap_or_else(|| format!("graphql http error: {status}"));
        return Err(Error::Protocol {
            status: Some(status),
            body: text,
            message,
        });
    }

    if parsed.has_errors() {
        let message = parsed
            .errors
            .first()
            .map(|err| err.message.clone())
            .unwrap_or_else(|| "graphql error".to_string());
        return Err(Error::PartialData {
            errors: parsed.errors,
            message,
        });
    }

    Ok(parsed)
}
