use crate::domain::context::OperationContext;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserServicePort;
use crate::proto::CreateUserRequest;
use crate::proto::CreateUserResponse;
use crate::user::errors::UserError;

use super::non_empty;

pub async fn create_user<S: UserServicePort>(
    service: &S,
    ctx: &OperationContext,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, UserError> {
    let command = CreateUserCommand {
        name: UserName::new(request.name)?,
        email: EmailAddress::new(request.email)?,
        password: request.password,
        created_by: non_empty(request.created_by),
    };

    let user = service.create_user(ctx, command).await?;

    Ok(CreateUserResponse {
        user: Some(user.into()),
    })
}
