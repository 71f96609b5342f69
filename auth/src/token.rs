use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues and verifies identity tokens.
///
/// The signing secret and token lifetime are fixed at construction and shared
/// read-only by every request.
pub struct TokenService {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - HS256 signing key
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `EmptyToken` - Nothing was presented
    /// * `InvalidToken` - Bad signature or malformed token
    /// * `TokenExpired` - `exp` is not in the future
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        if token.is_empty() {
            return Err(JwtError::EmptyToken);
        }

        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
