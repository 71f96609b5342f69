use tonic::Status;

use crate::user::errors::ErrorKind;
use crate::user::errors::UserError;

impl From<UserError> for Status {
    fn from(error: UserError) -> Self {
        let message = error.to_string();

        match error.kind() {
            ErrorKind::InvalidArgument => Status::invalid_argument(message),
            ErrorKind::NotFound => Status::not_found(message),
            ErrorKind::Conflict => Status::already_exists(message),
            ErrorKind::Unauthenticated => Status::unauthenticated(message),
            ErrorKind::Internal => {
                tracing::error!(error = %message, "Internal error");
                Status::internal(message)
            }
        }
    }
}
