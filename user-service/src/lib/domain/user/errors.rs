use thiserror::Error;

use crate::domain::context::DeadlineExceeded;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid ObjectID format: {0}")]
    InvalidFormat(String),
}

/// Error for UserName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("name is required")]
    Required,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Required,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error(transparent)]
    InvalidUserId(#[from] UserIdError),

    #[error(transparent)]
    InvalidName(#[from] UserNameError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    Password(#[from] auth::PasswordError),

    // Domain-level errors
    #[error("user not found")]
    NotFound,

    #[error("email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Password is invalid.")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage call aborted: {0}")]
    DeadlineExceeded(#[from] DeadlineExceeded),
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
    /// Classify the error once, at the layer that produced it.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidCredentials => ErrorKind::InvalidArgument,
            UserError::Password(e) if e.is_invalid_input() => ErrorKind::InvalidArgument,
            UserError::Password(_) => ErrorKind::Internal,
            UserError::NotFound => ErrorKind::NotFound,
            UserError::EmailAlreadyExists(_) => ErrorKind::Conflict,
            UserError::DatabaseError(_) | UserError::DeadlineExceeded(_) => ErrorKind::Internal,
        }
    }
}
