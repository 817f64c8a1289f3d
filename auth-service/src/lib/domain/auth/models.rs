use std::fmt;
use std::str::FromStr;

use auth_core::HasId;
use auth_core::Identity;
use chrono::DateTime;
use chrono::Utc;

use crate::auth::errors::EmailError;
use crate::auth::errors::PasswordPolicyError;
use crate::auth::errors::TokenStringError;
use crate::auth::errors::UsernameError;

/// Principal entity.
///
/// The authenticated identity read from the principal store. This service
/// mints and validates tokens for it; the store owns its lifecycle.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    pub enabled: bool,
    pub account_non_locked: bool,
    pub account_non_expired: bool,
    pub credentials_non_expired: bool,
}

impl Principal {
    /// A principal with any status flag unset cannot authenticate.
    pub fn is_usable(&self) -> bool {
        self.enabled
            && self.account_non_locked
            && self.account_non_expired
            && self.credentials_non_expired
    }
}

impl Identity for Principal {
    fn subject(&self) -> &str {
        self.email.as_str()
    }

    fn authorities(&self) -> Vec<String> {
        vec![self.role.authority().to_string()]
    }
}

impl HasId for Principal {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Granted role. New registrations always start as `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Spring-style authority string carried in token claims.
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

/// Username value type, 3-50 characters and not blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a validated username.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `InvalidLength` - Outside 3-50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        let length = username.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(UsernameError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, RFC 5322 validated and at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 100;

    /// Create a validated email address.
    ///
    /// # Errors
    /// * `TooLong` - Longer than 100 characters
    /// * `InvalidFormat` - Not a valid RFC 5322 address
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.chars().count() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at the boundary, 6-100 characters.
///
/// Only ever held transiently; the hash is what gets stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 100;

    /// Create a policy-checked password.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `InvalidLength` - Outside 6-100 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let length = password.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(PasswordPolicyError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print password material, not even in debug output.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Raw token string accepted at the boundary, 10-2000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenString(String);

impl TokenString {
    const MIN_LENGTH: usize = 10;
    const MAX_LENGTH: usize = 2000;

    /// Create a shape-checked token string. Signature and expiry are the
    /// codec's concern, this only rejects bodies that cannot be tokens.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `InvalidLength` - Outside 10-2000 characters
    pub fn new(token: String) -> Result<Self, TokenStringError> {
        if token.trim().is_empty() {
            return Err(TokenStringError::Blank);
        }

        let length = token.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(TokenStringError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new principal with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to authenticate an existing principal.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Data needed by the store to create a principal; the store assigns the id.
#[derive(Debug, Clone)]
pub struct CreatePrincipal {
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
}

/// Outcome of the validate flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValidation {
    pub valid: bool,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}
