use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Token codec for the signed token envelope.
///
/// Produces and consumes the compact form
/// `base64url(header).base64url(claims).base64url(signature)` signed with
/// HMAC-SHA256. Signature verification happens before any claim is read,
/// and expiry is checked only after the signature passes, so a forged
/// token never reaches the expiry oracle.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from shared secret material.
    ///
    /// # Arguments
    /// * `secret` - HMAC key bytes; at least 256 bits recommended for HS256
    ///
    /// # Security Notes
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - Rotating the secret invalidates every outstanding token
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// Deterministic given identical claims and key.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and verify a token at time `now`.
    ///
    /// The library's own expiry validation stays disabled: expiry is
    /// checked here against the injected clock with an exclusive bound,
    /// `exp == now` is already expired.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature does not match the payload
    /// * `Malformed` - Wrong segment count, bad base64 or claim schema
    /// * `Expired` - `exp` is at or before `now`
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Convenience gate: true when the token fails decoding for any reason.
    ///
    /// The specific failure kind is logged, not propagated. Use as a
    /// pre-check before claim extraction where the caller does not want a
    /// signature-vs-expiry oracle.
    pub fn is_invalid(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.decode(token, now) {
            Ok(_) => false,
            Err(TokenError::Expired) => {
                tracing::warn!("Token is expired");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Invalid token");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn at_millis(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn sample_claims(now: DateTime<Utc>) -> Claims {
        Claims::access(
            "alice@example.com",
            42,
            vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()],
            now,
            Duration::minutes(15),
        )
        .unwrap()
    }

    /// Replace one character inside the given token segment (0 = header,
    /// 1 = payload, 2 = signature) with a different base64url character.
    fn flip_segment_byte(token: &str, segment: usize) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let target = &mut parts[segment];
        let mid = target.len() / 2;
        let original = target.as_bytes()[mid];
        let replacement = if original == b'A' { 'B' } else { 'A' };
        target.replace_range(mid..mid + 1, &replacement.to_string());
        parts.join(".")
    }

    #[test]
    fn test_round_trip_preserves_claims_exactly() {
        let codec = TokenCodec::new(SECRET);
        let now = at_millis(1_700_000_000_000);
        let claims = sample_claims(now);

        let token = codec.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded = codec.decode(&token, now).expect("Failed to decode token");
        assert_eq!(decoded, claims);
        assert_eq!(
            decoded.roles,
            vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()]
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = TokenCodec::new(SECRET);
        let now = at_millis(1_700_000_000_000);
        let claims = sample_claims(now);

        let first = codec.encode(&claims).unwrap();
        let second = codec.encode(&claims).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tampered_payload_fails_signature_check() {
        let codec = TokenCodec::new(SECRET);
        let now = at_millis(1_700_000_000_000);
        let token = codec.encode(&sample_claims(now)).unwrap();

        let tampered = flip_segment_byte(&token, 1);
        assert_eq!(
            codec.decode(&tampered, now),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_tampered_signature_fails_signature_check() {
        let codec = TokenCodec::new(SECRET);
        let now = at_millis(1_700_000_000_000);
        let token = codec.encode(&sample_claims(now)).unwrap();

        let tampered = flip_segment_byte(&token, 2);
        assert_eq!(
            codec.decode(&tampered, now),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_wrong_secret_fails_signature_check() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new(b"another_secret_key_of_32_bytes_min!");
        let now = at_millis(1_700_000_000_000);

        let token = codec.encode(&sample_claims(now)).unwrap();
        assert_eq!(other.decode(&token, now), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let codec = TokenCodec::new(SECRET);
        let now = at_millis(1_700_000_000_000);

        assert!(matches!(
            codec.decode("not-a-jwt", now),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            codec.decode("a.b", now),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_expiry_bound_is_exclusive_at_decode() {
        let codec = TokenCodec::new(SECRET);
        let now = at_millis(1_700_000_000_000);
        let claims =
            Claims::refresh("alice@example.com", now, Duration::milliseconds(1)).unwrap();
        let token = codec.encode(&claims).unwrap();

        // Still valid one millisecond before expiry.
        assert!(codec.decode(&token, now).is_ok());
        // `exp == now` counts as expired.
        assert_eq!(
            codec.decode(&token, now + Duration::milliseconds(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_is_invalid_swallows_failure_kind() {
        let codec = TokenCodec::new(SECRET);
        let now = at_millis(1_700_000_000_000);
        let claims = Claims::refresh("alice@example.com", now, Duration::days(7)).unwrap();
        let token = codec.encode(&claims).unwrap();

        assert!(!codec.is_invalid(&token, now));
        assert!(codec.is_invalid("not-a-jwt", now));
        assert!(codec.is_invalid(&flip_segment_byte(&token, 2), now));
        assert!(codec.is_invalid(&token, now + Duration::days(8)));
    }
}
