//! operation helper
//!
//! binds a query catalog document to its response payload type.

use serde::de::DeserializeOwned;

/// graphql operation contract
pub trait Operation {
    /// graphql query or mutation string
    const QUERY: &'static str;
    /// response payload type
    type Response: DeserializeOwned;
}
