use std::sync::Arc;

use async_trait::async_trait;
use auth_core::Identity;
use auth_core::PasswordHasher;
use auth_core::TokenCodec;
use auth_core::TokenIssuer;
use auth_core::TokenPair;
use chrono::Utc;

use crate::auth::errors::AuthError;
use crate::auth::models::CreatePrincipal;
use crate::auth::models::LoginCommand;
use crate::auth::models::RegisterCommand;
use crate::auth::models::Role;
use crate::auth::models::TokenString;
use crate::auth::models::TokenValidation;
use crate::auth::ports::AuthServicePort;
use crate::auth::ports::PrincipalRepository;
use crate::auth::verifier::CredentialVerifier;

/// Default role reported when a principal carries no authorities.
const DEFAULT_ROLE: &str = "ROLE_USER";

/// Authentication orchestrator.
///
/// Combines the principal store, credential verifier and token issuer into
/// the register/login/refresh/validate flows. Component errors are narrow;
/// this is where they get widened at trust boundaries: login collapses all
/// verifier failures into `AuthenticationFailed`, refresh collapses all
/// decode failures into `InvalidRefreshToken`, and validate reports every
/// downstream error uniformly as `TokenValidationFailed`.
pub struct AuthService<R>
where
    R: PrincipalRepository,
{
    repository: Arc<R>,
    verifier: CredentialVerifier<R>,
    codec: Arc<TokenCodec>,
    issuer: TokenIssuer,
    hasher: PasswordHasher,
}

impl<R> AuthService<R>
where
    R: PrincipalRepository,
{
    /// Create the orchestrator with injected collaborators.
    ///
    /// # Arguments
    /// * `repository` - Principal store implementation
    /// * `codec` - Shared token codec
    /// * `issuer` - Token issuer configured with access/refresh lifetimes
    pub fn new(repository: Arc<R>, codec: Arc<TokenCodec>, issuer: TokenIssuer) -> Self {
        Self {
            verifier: CredentialVerifier::new(Arc::clone(&repository)),
            repository,
            codec,
            issuer,
            hasher: PasswordHasher::new(),
        }
    }

    async fn resolve_validation(
        &self,
        token: &TokenString,
    ) -> Result<TokenValidation, AuthError> {
        let claims = self.codec.decode(token.as_str(), Utc::now())?;

        let principal = self
            .repository
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::PrincipalNotFound(claims.sub.clone()))?;

        Ok(TokenValidation {
            valid: true,
            email: claims.sub,
            role: primary_authority(&principal.authorities()),
            expires_at: claims.exp,
        })
    }
}

/// First authority in authority order, or the fixed default when the
/// principal carries none.
fn primary_authority(authorities: &[String]) -> String {
    authorities
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_ROLE.to_string())
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: PrincipalRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::PrincipalAlreadyExists(
                command.email.to_string(),
            ));
        }

        let password_hash = self.hasher.hash(command.password.as_str())?;

        let principal = self
            .repository
            .create(CreatePrincipal {
                email: command.email,
                username: command.username,
                password_hash,
                role: Role::User,
            })
            .await?;

        tracing::info!(email = %principal.email, "Registered new principal");
        Ok(())
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        // Existence is reported separately from bad credentials; see the
        // enumeration note in DESIGN.md.
        self.repository
            .find_by_email(command.email.as_str())
            .await?
            .ok_or_else(|| {
                tracing::warn!("Login attempt for unknown email");
                AuthError::PrincipalNotFound(command.email.to_string())
            })?;

        // Every verifier failure widens to the same kind: wrong password
        // and verifier breakage are indistinguishable to the caller.
        let principal = self
            .verifier
            .verify(command.email.as_str(), command.password.as_str())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Authentication failed");
                AuthError::AuthenticationFailed
            })?;

        Ok(self.issuer.token_pair(&principal, Utc::now())?)
    }

    async fn refresh(&self, refresh_token: TokenString) -> Result<TokenPair, AuthError> {
        let now = Utc::now();

        // Single gate subsuming malformed, tampered and expired.
        if self.codec.is_invalid(refresh_token.as_str(), now) {
            return Err(AuthError::InvalidRefreshToken);
        }

        let claims = self
            .codec
            .decode(refresh_token.as_str(), now)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        // Lookup failure propagates as-is, not wrapped.
        let principal = self
            .repository
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::PrincipalNotFound(claims.sub.clone()))?;

        tracing::debug!(subject = %claims.sub, "Refreshing token pair");
        Ok(self.issuer.token_pair(&principal, now)?)
    }

    async fn validate(&self, token: TokenString) -> Result<TokenValidation, AuthError> {
        if self.codec.is_invalid(token.as_str(), Utc::now()) {
            tracing::warn!("Token validation failed");
            return Err(AuthError::TokenValidationFailed(
                "Token is invalid or expired".to_string(),
            ));
        }

        // The validate endpoint may be called by untrusted services, so
        // every downstream error collapses into one external kind.
        self.resolve_validation(&token).await.map_err(|e| {
            tracing::error!(error = %e, "Unexpected error during token validation");
            AuthError::TokenValidationFailed(format!("Could not process token: {}", e))
        })
    }
}
