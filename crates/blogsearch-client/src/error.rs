//! Error types for the hosted search client.

use thiserror::Error;

/// Errors from the hosted search service endpoints.
///
/// The search page never surfaces these to the host page; the session logs
/// them and leaves the result list unchanged.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network-level failure (DNS, connection, fetch abort).
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials or index name rejected by the service.
    #[error("Unauthorized: credentials or index name rejected")]
    Unauthorized,

    /// Query quota exhausted.
    #[error("Rate limited by the search service")]
    RateLimited,

    /// Any other non-success response.
    #[error("Search service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected schema.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Map a non-success HTTP status to a `ClientError`.
pub(crate) fn classify_status(status: u16, body: String) -> ClientError {
    match status {
        401 | 403 => ClientError::Unauthorized,
        429 => ClientError::RateLimited,
        _ => ClientError::Api {
            status,
            message: body,
        },
    }
}
