use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Required,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error surfaced by every gateway operation.
///
/// Remote failures keep the classification user-service gave them; the
/// message is passed through untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Internal(String),
}

/// Client-facing classification of a [`UserError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Conflict,
    Unauthenticated,
    Internal,
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidEmail(_)
            | UserError::MissingField(_)
            | UserError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::Conflict(_) => ErrorKind::Conflict,
            UserError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            UserError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        if err.is_unauthenticated() {
            UserError::Unauthenticated(err.to_string())
        } else {
            UserError::Internal(err.to_string())
        }
    }
}
