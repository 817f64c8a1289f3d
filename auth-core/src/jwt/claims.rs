use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::ClaimsError;

/// Structured token payload.
///
/// Two claim shapes share this type: access tokens carry the full set
/// (subject, user id, roles), refresh tokens carry the subject only so a
/// leaked refresh token discloses identity but no authorization scope.
///
/// `iat`/`exp` are serialized as millisecond Unix timestamps; time-to-live
/// configuration is millisecond-granular and the expiry bound is exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (login identifier, e.g. email)
    pub sub: String,

    /// User identifier, absent on refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Granted authorities in insertion order, absent when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Issued at
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub iat: DateTime<Utc>,

    /// Expiration time, always strictly later than `iat`
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub exp: DateTime<Utc>,
}

impl Claims {
    /// Build access-token claims with the full claim set.
    ///
    /// # Errors
    /// * `NonPositiveLifetime` - `ttl` is zero or negative
    pub fn access(
        subject: impl Into<String>,
        user_id: i64,
        roles: Vec<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, ClaimsError> {
        Self::checked(subject.into(), Some(user_id), roles, now, ttl)
    }

    /// Build refresh-token claims carrying the subject only.
    ///
    /// # Errors
    /// * `NonPositiveLifetime` - `ttl` is zero or negative
    pub fn refresh(
        subject: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, ClaimsError> {
        Self::checked(subject.into(), None, Vec::new(), now, ttl)
    }

    fn checked(
        sub: String,
        user_id: Option<i64>,
        roles: Vec<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, ClaimsError> {
        if ttl <= Duration::zero() {
            return Err(ClaimsError::NonPositiveLifetime(ttl.num_milliseconds()));
        }

        Ok(Self {
            sub,
            user_id,
            roles,
            iat: now,
            exp: now + ttl,
        })
    }

    /// Check whether the token is expired at `now` (exclusive bound:
    /// `exp == now` counts as expired).
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_access_claims_carry_full_set() {
        let now = at_millis(1_700_000_000_000);
        let claims = Claims::access(
            "alice@example.com",
            42,
            vec!["ROLE_ADMIN".to_string()],
            now,
            Duration::minutes(15),
        )
        .unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.user_id, Some(42));
        assert_eq!(claims.roles, vec!["ROLE_ADMIN".to_string()]);
        assert_eq!(claims.exp - claims.iat, Duration::minutes(15));
    }

    #[test]
    fn test_refresh_claims_are_minimal() {
        let now = at_millis(1_700_000_000_000);
        let claims = Claims::refresh("alice@example.com", now, Duration::days(7)).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert!(claims.user_id.is_none());
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn test_minimal_claims_omit_optional_fields_on_wire() {
        let now = at_millis(1_700_000_000_000);
        let claims = Claims::refresh("alice@example.com", now, Duration::days(7)).unwrap();

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("user_id").is_none());
        assert!(json.get("roles").is_none());
        assert_eq!(json["iat"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let now = at_millis(1_700_000_000_000);

        let result = Claims::refresh("alice@example.com", now, Duration::zero());
        assert_eq!(result, Err(ClaimsError::NonPositiveLifetime(0)));

        let result = Claims::access("a", 1, vec![], now, Duration::milliseconds(-5));
        assert!(result.is_err());
    }

    #[test]
    fn test_expiry_bound_is_exclusive() {
        let now = at_millis(1_700_000_000_000);
        let claims = Claims::refresh("alice@example.com", now, Duration::milliseconds(1)).unwrap();

        assert!(!claims.is_expired(now));
        assert!(claims.is_expired(now + Duration::milliseconds(1)));
        assert!(claims.is_expired(now + Duration::milliseconds(2)));
    }
}
