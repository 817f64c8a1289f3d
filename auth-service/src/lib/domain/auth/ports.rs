use async_trait::async_trait;
use auth_core::TokenPair;

use crate::auth::errors::AuthError;
use crate::auth::models::CreatePrincipal;
use crate::auth::models::LoginCommand;
use crate::auth::models::Principal;
use crate::auth::models::RegisterCommand;
use crate::auth::models::TokenString;
use crate::auth::models::TokenValidation;

/// Port for the authentication flows exposed over HTTP.
///
/// Every flow is a single request/response with no multi-step handshake;
/// all state lives in the tokens themselves and the principal store.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new principal. No token is issued.
    ///
    /// # Errors
    /// * `PrincipalAlreadyExists` - Email is already taken
    /// * `Password` - Credential hashing failed
    /// * `Store` - Principal store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `PrincipalNotFound` - No principal with this email
    /// * `AuthenticationFailed` - Wrong password or verifier failure,
    ///   deliberately not distinguished
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Exchange a valid refresh token for a new token pair.
    ///
    /// The presented refresh token stays usable until it expires; there is
    /// no revocation list.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Malformed, tampered or expired token,
    ///   deliberately not distinguished
    /// * `PrincipalNotFound` - Token subject no longer exists
    async fn refresh(&self, refresh_token: TokenString) -> Result<TokenPair, AuthError>;

    /// Validate a token and report subject, role and expiry.
    ///
    /// # Errors
    /// * `TokenValidationFailed` - Any decode or lookup failure, reported
    ///   uniformly with a diagnostic message
    async fn validate(&self, token: TokenString) -> Result<TokenValidation, AuthError>;
}

/// Persistence operations for the principal store.
///
/// The store owns principal lifecycle and consistency; this service only
/// reads and inserts.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Persist a new principal; the store assigns the id.
    ///
    /// # Errors
    /// * `PrincipalAlreadyExists` - Email is already taken
    /// * `Store` - Store operation failed
    async fn create(&self, principal: CreatePrincipal) -> Result<Principal, AuthError>;

    /// Retrieve a principal by email.
    ///
    /// # Returns
    /// Optional principal (None if not found)
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, AuthError>;
}
