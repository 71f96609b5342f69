use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Access token is empty")]
    EmptyToken,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

impl JwtError {
    /// Whether the failure means the presented credential is not acceptable.
    ///
    /// Everything except an encoding failure on our side.
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, JwtError::EncodingFailed(_))
    }
}
