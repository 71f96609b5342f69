use crate::domain::context::OperationContext;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserServicePort;
use crate::proto::UpdateUserRequest;
use crate::proto::UpdateUserResponse;
use crate::user::errors::UserError;

use super::non_empty;

pub async fn update_user<S: UserServicePort>(
    service: &S,
    ctx: &OperationContext,
    request: UpdateUserRequest,
) -> Result<UpdateUserResponse, UserError> {
    let user_id = UserId::from_string(&request.id)?;

    let command = UpdateUserCommand {
        name: non_empty(request.name).map(UserName::new).transpose()?,
        email: non_empty(request.email).map(EmailAddress::new).transpose()?,
        password: non_empty(request.password),
    };

    let user = service.update_user(ctx, &user_id, command).await?;

    Ok(UpdateUserResponse {
        user: Some(user.into()),
    })
}
