use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::identity::HasId;
use crate::identity::Identity;
use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;

/// Mints token pairs for already-verified principals.
///
/// Access tokens carry the full claim set and a short time-to-live; refresh
/// tokens carry the subject only and a long one. Issuance is a pure function
/// of the principal, the key and `now`.
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// Access/refresh token pair returned by login and refresh flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenIssuer {
    /// Create an issuer sharing a codec with its callers.
    ///
    /// # Arguments
    /// * `codec` - Signing codec, shared read-only across requests
    /// * `access_ttl` - Access token lifetime
    /// * `refresh_ttl` - Refresh token lifetime
    pub fn new(codec: Arc<TokenCodec>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            codec,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a short-lived access token with the full claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims construction or signing failed
    pub fn access_token<P>(&self, principal: &P, now: DateTime<Utc>) -> Result<String, TokenError>
    where
        P: Identity + HasId,
    {
        let claims = Claims::access(
            principal.subject(),
            principal.id(),
            principal.authorities(),
            now,
            self.access_ttl,
        )
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        self.codec.encode(&claims)
    }

    /// Issue a long-lived refresh token carrying the subject only.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims construction or signing failed
    pub fn refresh_token<P>(&self, principal: &P, now: DateTime<Utc>) -> Result<String, TokenError>
    where
        P: Identity,
    {
        let claims = Claims::refresh(principal.subject(), now, self.refresh_ttl)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        self.codec.encode(&claims)
    }

    /// Issue both tokens at the same instant.
    ///
    /// # Errors
    /// * `EncodingFailed` - Either issuance failed
    pub fn token_pair<P>(&self, principal: &P, now: DateTime<Utc>) -> Result<TokenPair, TokenError>
    where
        P: Identity + HasId,
    {
        Ok(TokenPair {
            access_token: self.access_token(principal, now)?,
            refresh_token: self.refresh_token(principal, now)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestPrincipal {
        id: i64,
        email: String,
        roles: Vec<String>,
    }

    impl Identity for TestPrincipal {
        fn subject(&self) -> &str {
            &self.email
        }

        fn authorities(&self) -> Vec<String> {
            self.roles.clone()
        }
    }

    impl HasId for TestPrincipal {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn issuer() -> (TokenIssuer, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::new(b"test_secret_key_at_least_32_bytes!"));
        let issuer = TokenIssuer::new(
            Arc::clone(&codec),
            Duration::minutes(15),
            Duration::days(7),
        );
        (issuer, codec)
    }

    fn principal() -> TestPrincipal {
        TestPrincipal {
            id: 42,
            email: "alice@example.com".to_string(),
            roles: vec!["ROLE_ADMIN".to_string()],
        }
    }

    #[test]
    fn test_access_token_carries_identity_and_ttl() {
        let (issuer, codec) = issuer();
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        let token = issuer.access_token(&principal(), now).unwrap();
        let claims = codec.decode(&token, now).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.user_id, Some(42));
        assert_eq!(claims.roles, vec!["ROLE_ADMIN".to_string()]);
        assert_eq!(claims.exp - claims.iat, Duration::minutes(15));
    }

    #[test]
    fn test_refresh_token_carries_subject_only() {
        let (issuer, codec) = issuer();
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        let token = issuer.refresh_token(&principal(), now).unwrap();
        let claims = codec.decode(&token, now).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert!(claims.user_id.is_none());
        assert!(claims.roles.is_empty());
        assert_eq!(claims.exp - claims.iat, Duration::days(7));
    }

    #[test]
    fn test_refresh_outlives_access() {
        let (issuer, codec) = issuer();
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        let pair = issuer.token_pair(&principal(), now).unwrap();

        // After the access token has expired the refresh token still decodes.
        let later = now + Duration::hours(1);
        assert_eq!(
            codec.decode(&pair.access_token, later),
            Err(TokenError::Expired)
        );
        assert!(codec.decode(&pair.refresh_token, later).is_ok());
    }
}
