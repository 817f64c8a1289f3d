use auth_core::PasswordError;
use auth_core::TokenError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is required")]
    Blank,

    #[error("Username must be between {min} and {max} characters, got {actual}")]
    InvalidLength {
        min: usize,
        max: usize,
        actual: usize,
    },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email must not exceed {max} characters")]
    TooLong { max: usize },

    #[error("Email should be valid: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations at the boundary
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Blank,

    #[error("Password must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },
}

/// Error for raw token string shape violations at the boundary
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenStringError {
    #[error("Token is required")]
    Blank,

    #[error("Token length is invalid (expected {min}-{max} characters)")]
    InvalidLength { min: usize, max: usize },
}

/// Error for credential verification.
///
/// Lookup and comparison failures are distinct kinds here; the
/// orchestrator decides how much of that distinction to disclose.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Principal not found: {0}")]
    PrincipalNotFound(String),

    #[error("Credential does not match")]
    CredentialMismatch,

    #[error("Account is disabled, locked or expired")]
    AccountUnusable,

    #[error("Credential verifier error: {0}")]
    Verifier(String),
}

/// Top-level error for all authentication flows.
///
/// Component errors are narrow; this type is where they get widened at
/// trust boundaries. All refresh-token decode failures collapse into
/// `InvalidRefreshToken`, and the validate flow reports every internal
/// error as `TokenValidationFailed` so the endpoint leaks no structure.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Principal not found with email: {0}")]
    PrincipalNotFound(String),

    #[error("Principal already exists with email: {0}")]
    PrincipalAlreadyExists(String),

    #[error("Invalid email or password")]
    AuthenticationFailed,

    #[error("Refresh token is invalid or expired")]
    InvalidRefreshToken,

    #[error("Token validation failed: {0}")]
    TokenValidationFailed(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Principal store error: {0}")]
    Store(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Store(err.to_string())
    }
}
