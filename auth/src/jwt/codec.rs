use std::sync::Arc;

use chrono::DateTime;
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
use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::JwtError;
use super::errors::TokenError;
use super::errors::TokenErrorReason;

/// The only signing algorithm issued or accepted.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Shortest token lifetime the codec accepts, in hours.
pub const MIN_TTL_HOURS: i64 = 1;

/// Longest token lifetime the codec accepts, in hours.
pub const MAX_TTL_HOURS: i64 = 720;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Issues and parses signed, time-bounded session tokens.
///
/// Tokens are HS256 JWTs. Secret and lifetime are fixed at construction;
/// validation is a pure local computation with no I/O.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Create a new codec with a secret key and token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `ttl` - Lifetime of every issued token
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    /// * `TtlOutOfRange` - Lifetime is shorter than 1 hour or longer than 720 hours
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        if ttl < Duration::hours(MIN_TTL_HOURS) || ttl > Duration::hours(MAX_TTL_HOURS) {
            return Err(JwtError::TtlOutOfRange {
                min: MIN_TTL_HOURS,
                max: MAX_TTL_HOURS,
                actual: ttl.num_hours(),
            });
        }

        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the injected clock in `parse_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock: Arc::new(SystemClock),
        })
    }

    /// Convenience constructor taking the lifetime in whole hours.
    ///
    /// # Errors
    /// Same as [`TokenCodec::new`].
    pub fn from_hours(secret: &[u8], ttl_hours: i64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        // Checked before conversion: `Duration::hours` panics on huge values
        if !(MIN_TTL_HOURS..=MAX_TTL_HOURS).contains(&ttl_hours) {
            return Err(JwtError::TtlOutOfRange {
                min: MIN_TTL_HOURS,
                max: MAX_TTL_HOURS,
                actual: ttl_hours,
            });
        }

        Self::new(secret, Duration::hours(ttl_hours))
    }

    /// Replace the clock used by `issue` and `parse`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` starting now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, role: &str) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, role, self.clock.now())
    }

    /// Issue a token whose lifetime starts at `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::new(subject, role, now, self.ttl);
        let header = Header::new(ALGORITHM);

        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify a token and return its claims, using the codec's clock.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        self.parse_at(token, self.clock.now())
    }

    /// Verify a token as of `now`.
    ///
    /// Checks structure, the pinned algorithm, the signature, then expiry.
    ///
    /// # Errors
    /// * `TokenError` - Any check failed; `reason()` tells which
    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.exp < claims.iat {
            return Err(TokenError::new(TokenErrorReason::Malformed));
        }

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::new(TokenErrorReason::Expired));
        }

        Ok(claims)
    }
}
