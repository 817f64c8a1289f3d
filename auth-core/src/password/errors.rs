use thiserror::Error;

/// Error type for password operations.
///
/// `Mismatch` is a distinct kind so callers can tell a wrong password from
/// a broken verifier and decide how much to disclose at their boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password does not match stored hash")]
    Mismatch,

    #[error("Stored password hash is invalid: {0}")]
    InvalidHash(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
