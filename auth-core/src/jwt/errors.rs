use thiserror::Error;

/// Error type for token encode/decode operations.
///
/// Decode failures are deliberately narrow so callers can tell a tampered
/// token from a merely stale one before deciding how much to disclose.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Error for claims construction failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("Token lifetime must be positive, got {0}ms")]
    NonPositiveLifetime(i64),
}

