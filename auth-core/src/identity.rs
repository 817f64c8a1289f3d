//! Capability traits describing a principal to the token issuer.
//!
//! Services keep their own principal types; implementing these traits is all
//! it takes to mint tokens for them. Carrying a `user_id` claim is gated on
//! [`HasId`] at the type level instead of a runtime downcast.

/// An authenticated identity that can be named in a token.
pub trait Identity {
    /// Login identifier used as the token subject.
    fn subject(&self) -> &str;

    /// Granted authorities in authority order, may be empty.
    fn authorities(&self) -> Vec<String>;
}

/// Capability of supplying a stable numeric identifier.
///
/// Only principals implementing this can receive access tokens carrying the
/// `user_id` claim.
pub trait HasId {
    fn id(&self) -> i64;
}
