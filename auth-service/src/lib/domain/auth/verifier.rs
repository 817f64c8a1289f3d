use std::sync::Arc;

use auth_core::PasswordError;
use auth_core::PasswordHasher;

use crate::auth::errors::CredentialError;
use crate::auth::models::Principal;
use crate::auth::ports::PrincipalRepository;

/// Credential verifier.
///
/// Resolves a subject against the principal store and compares the
/// presented password with the stored hash using the slow, salted
/// comparison from `auth_core`. Lookup failure, mismatch and unusable
/// accounts stay distinct kinds at this boundary.
pub struct CredentialVerifier<R>
where
    R: PrincipalRepository,
{
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R> CredentialVerifier<R>
where
    R: PrincipalRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            hasher: PasswordHasher::new(),
        }
    }

    /// Verify a subject/password pair and return the matching principal.
    ///
    /// # Errors
    /// * `PrincipalNotFound` - Subject absent from the store
    /// * `CredentialMismatch` - Password does not match the stored hash
    /// * `AccountUnusable` - A principal status flag is unset
    /// * `Verifier` - Store or hash-comparison failure
    pub async fn verify(
        &self,
        subject: &str,
        password: &str,
    ) -> Result<Principal, CredentialError> {
        let principal = self
            .repository
            .find_by_email(subject)
            .await
            .map_err(|e| CredentialError::Verifier(e.to_string()))?
            .ok_or_else(|| CredentialError::PrincipalNotFound(subject.to_string()))?;

        if !principal.is_usable() {
            return Err(CredentialError::AccountUnusable);
        }

        self.hasher
            .verify(password, &principal.password_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => CredentialError::CredentialMismatch,
                other => CredentialError::Verifier(other.to_string()),
            })?;

        Ok(principal)
    }
}
