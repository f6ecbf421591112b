use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Session token claims.
///
/// Immutable once issued. `exp` is always `iat` plus the codec's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Role of the subject at issuance
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    /// Create claims for a subject, issued at `issued_at` and valid for `ttl`.
    ///
    /// Sub-second precision is dropped, as in the encoded token.
    pub fn new(
        subject: impl ToString,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at exactly its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_new_claims() {
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let claims = Claims::new("user123", "standard", issued_at, Duration::hours(24));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.role, "standard");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.issued_at(), Some(issued_at));
        assert_eq!(claims.expires_at(), Some(issued_at + Duration::hours(24)));
    }

    #[test]
    fn test_token_ids_are_unique() {
        let now = Utc::now();
        let first = Claims::new("user123", "standard", now, Duration::hours(1));
        let second = Claims::new("user123", "standard", now, Duration::hours(1));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "user123".to_string(),
            role: "standard".to_string(),
            iat: 0,
            exp: 1000,
            jti: "id".to_string(),
        };

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}
