//! Client error types

use thiserror::Error;

/// Client error type
///
/// Nothing here is fatal: save and lookup failures are surfaced to the
/// host as values to show in a notification, and ledger state is never
/// touched by a failed call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request failed in transport or while decoding the response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Order or route not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
