use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity token claims.
///
/// `sub` identifies the user, `exp` is always `iat + ttl`.
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        Self::issued_at(subject, Utc::now().timestamp(), ttl)
    }

    /// Create claims with an explicit issue time.
    pub fn issued_at(subject: impl ToString, iat: i64, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    /// Check if the token is expired.
    ///
    /// A token is only valid while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("user123", Duration::minutes(5));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn test_issued_at() {
        let claims = Claims::issued_at("user123", 1_000, Duration::hours(24));
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 1_000 + 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::issued_at("user123", 900, Duration::seconds(100));

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_wire_format() {
        let claims = Claims::issued_at("abc", 10, Duration::seconds(5));
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json, serde_json::json!({"sub": "abc", "iat": 10, "exp": 15}));
    }
}
