/// Token manager: signed access tokens and opaque refresh tokens
///
/// Access tokens are HS256 (HMAC-SHA256) JWTs carrying the user id and an
/// expiry; they are verified statelessly on every request, so the hot path
/// never touches storage. Refresh tokens are 256-bit random values with no
/// structure at all — they must be revocable (logout, rotation), so their
/// state lives in the `refresh_sessions` table and a signature would buy
/// nothing.
///
/// # Security
///
/// - The signing secret should be at least 32 bytes (256 bits).
/// - [`TokenManager::parse`] verifies signature, issuer and expiry with zero
///   leeway, and collapses every failure into the single
///   [`TokenError::Invalid`] value. An expired token is indistinguishable
///   from a tampered one, by contract.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::TokenManager;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let manager = TokenManager::new(
///     "secret-key-at-least-32-bytes-long!!",
///     Duration::minutes(15),
///     Duration::days(30),
/// );
///
/// let user_id = Uuid::new_v4();
/// let pair = manager.create_tokens_pair(user_id)?;
/// assert_eq!(manager.parse(&pair.access_token)?, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ISSUER: &str = "taskboard";

/// Refresh tokens are 32 random bytes, hex-encoded
const REFRESH_TOKEN_BYTES: usize = 32;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signing failed. This means the signing key is misconfigured and is
    /// fatal at bootstrap, not a per-request condition.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Verification failed for any reason: bad signature, malformed token,
    /// wrong issuer, or past expiry. Deliberately uniform so the failure
    /// cause cannot be used as an oracle.
    #[error("invalid or expired token")]
    Invalid,
}

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: Uuid,

    /// Issuer - always "taskboard"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// A freshly issued access/refresh pair
///
/// The refresh token is not persisted here; the caller stores it as a
/// `RefreshSession` row together with `refresh_expires_at`.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Signed access token (JWT)
    pub access_token: String,

    /// Opaque refresh token (hex-encoded random bytes)
    pub refresh_token: String,

    /// When the refresh grant stops being honored
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issues and verifies token pairs
///
/// Stateless except for the signing secret and the configured TTLs, so a
/// single instance is shared across all requests behind an `Arc`.
#[derive(Clone)]
pub struct TokenManager {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Creates a signed access token and an opaque refresh token
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if encoding fails, which indicates a
    /// misconfigured key rather than a recoverable request error.
    pub fn create_tokens_pair(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(self.secret.as_bytes());
        let access_token =
            encode(&header, &claims, &key).map_err(|e| TokenError::Signing(e.to_string()))?;

        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);

        Ok(TokenPair {
            access_token,
            refresh_token: hex::encode(bytes),
            refresh_expires_at: now + self.refresh_ttl,
        })
    }

    /// Verifies an access token and returns the user id it asserts
    ///
    /// Expiry is checked at use-time with zero leeway. Every failure maps to
    /// [`TokenError::Invalid`].
    pub fn parse(&self, token: &str) -> Result<Uuid, TokenError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &key, &validation).map_err(|_| TokenError::Invalid)?;

        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new(
            "test-secret-key-at-least-32-bytes-long",
            Duration::minutes(15),
            Duration::days(30),
        )
    }

    #[test]
    fn test_access_token_round_trip() {
        let manager = manager();
        let user_id = Uuid::new_v4();

        let pair = manager.create_tokens_pair(user_id).unwrap();
        assert_eq!(manager.parse(&pair.access_token).unwrap(), user_id);
    }

    #[test]
    fn test_refresh_token_is_opaque_and_fresh() {
        let manager = manager();
        let user_id = Uuid::new_v4();

        let first = manager.create_tokens_pair(user_id).unwrap();
        let second = manager.create_tokens_pair(user_id).unwrap();

        // 64 hex chars, never repeated, and not parseable as an access token
        assert_eq!(first.refresh_token.len(), REFRESH_TOKEN_BYTES * 2);
        assert_ne!(first.refresh_token, second.refresh_token);
        assert!(manager.parse(&first.refresh_token).is_err());
    }

    #[test]
    fn test_refresh_expiry_uses_refresh_ttl() {
        let manager = manager();
        let pair = manager.create_tokens_pair(Uuid::new_v4()).unwrap();

        let remaining = pair.refresh_expires_at - Utc::now();
        assert!(remaining > Duration::days(29));
        assert!(remaining <= Duration::days(30));
    }

    #[test]
    fn test_expired_token_fails_parse() {
        let manager = TokenManager::new(
            "test-secret-key-at-least-32-bytes-long",
            Duration::seconds(-1),
            Duration::days(30),
        );

        let pair = manager.create_tokens_pair(Uuid::new_v4()).unwrap();
        assert!(matches!(
            manager.parse(&pair.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_tampered_and_expired_are_indistinguishable() {
        let good = manager();
        let expired_manager = TokenManager::new(
            "test-secret-key-at-least-32-bytes-long",
            Duration::seconds(-1),
            Duration::days(30),
        );

        let expired = expired_manager
            .create_tokens_pair(Uuid::new_v4())
            .unwrap()
            .access_token;
        let mut tampered = good
            .create_tokens_pair(Uuid::new_v4())
            .unwrap()
            .access_token;
        tampered.push('x');

        let expired_err = good.parse(&expired).unwrap_err();
        let tampered_err = good.parse(&tampered).unwrap_err();

        assert_eq!(expired_err.to_string(), tampered_err.to_string());
        assert!(matches!(expired_err, TokenError::Invalid));
        assert!(matches!(tampered_err, TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_fails_parse() {
        let manager = manager();
        let other = TokenManager::new(
            "another-secret-key-that-is-32-bytes!!!",
            Duration::minutes(15),
            Duration::days(30),
        );

        let pair = manager.create_tokens_pair(Uuid::new_v4()).unwrap();
        assert!(matches!(
            other.parse(&pair.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_garbage_input_fails_parse() {
        let manager = manager();
        assert!(matches!(manager.parse(""), Err(TokenError::Invalid)));
        assert!(matches!(
            manager.parse("not-a-jwt"),
            Err(TokenError::Invalid)
        ));
    }
}
