use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Salted, deliberately slow comparison (internally Argon2id). Hashes are
/// stored in PHC string format, which carries algorithm, parameters and salt.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher with secure defaults.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Compare a plaintext password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash in PHC string format
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    /// * `InvalidHash` - Stored hash cannot be parsed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        let argon2 = Argon2::default();

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|e| match e {
                HashError::Password => PasswordError::Mismatch,
                other => PasswordError::InvalidHash(other.to_string()),
            })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2"));

        assert!(hasher.verify(password, &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_is_a_mismatch() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("correct_password").unwrap();

        let result = hasher.verify("wrong_password", &hash);
        assert_eq!(result, Err(PasswordError::Mismatch));
    }

    #[test]
    fn test_invalid_hash_is_not_a_mismatch() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }
}
