use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Default access token lifetime.
const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;

/// Default refresh token lifetime.
const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

/// Issues and validates signed, time-bounded tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a server-held symmetric secret.
/// Tokens are never stored server-side; signature and expiry decide
/// validity at decode time.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a token service with default lifetimes (15 min access,
    /// 7 day refresh).
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::minutes(DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::days(DEFAULT_REFRESH_TTL_DAYS),
        }
    }

    /// Override both token lifetimes.
    pub fn with_ttls(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    /// Issue a short-lived access token.
    ///
    /// Merges `exp = now + access_ttl` and `iat = now` into the caller's
    /// claims before signing.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_access(&self, claims: Claims) -> Result<String, TokenError> {
        self.issue(claims, self.access_ttl)
    }

    /// Issue a long-lived refresh token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_refresh(&self, claims: Claims) -> Result<String, TokenError> {
        self.issue(claims, self.refresh_ttl)
    }

    /// Issue a token with an explicit lifetime.
    ///
    /// A non-positive `ttl` produces a token that is already expired.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, claims: Claims, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = claims
            .with_expiration((now + ttl).timestamp())
            .with_issued_at(now.timestamp());

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Verifies the signature and the expiry claim with zero leeway. Every
    /// failure mode collapses to `InvalidToken`: an expired token, a token
    /// signed with another secret, and garbage input are indistinguishable
    /// to the caller.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure, or expiry check failed
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::InvalidToken)?;

        Ok(token_data.claims)
    }
}
