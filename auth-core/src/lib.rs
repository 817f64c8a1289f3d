//! Authentication core library
//!
//! Provides the token and credential primitives for the authentication service:
//! - Password hashing (Argon2id)
//! - Signed token encoding, decoding and verification (HS256)
//! - Access/refresh token issuance with separate time-to-live values
//!
//! The library has no knowledge of users or storage. Services describe their
//! principal types through the [`Identity`] and [`HasId`] capability traits and
//! adapt these implementations behind their own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth_core::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Token Round Trip
//! ```
//! use auth_core::{Claims, TokenCodec};
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let now = Utc::now();
//! let claims = Claims::refresh("alice@example.com", now, Duration::days(7)).unwrap();
//! let token = codec.encode(&claims).unwrap();
//! let decoded = codec.decode(&token, now).unwrap();
//! assert_eq!(decoded.sub, "alice@example.com");
//! ```

pub mod identity;
pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use identity::HasId;
pub use identity::Identity;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
