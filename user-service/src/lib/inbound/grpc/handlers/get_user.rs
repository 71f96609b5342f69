use crate::domain::context::OperationContext;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::GetUserRequest;
use crate::proto::GetUserResponse;
use crate::user::errors::UserError;

pub async fn get_user<S: UserServicePort>(
    service: &S,
    ctx: &OperationContext,
    request: GetUserRequest,
) -> Result<GetUserResponse, UserError> {
    let user_id = UserId::from_string(&request.id)?;
    let user = service.get_user(ctx, &user_id).await?;

    Ok(GetUserResponse {
        user: Some(user.into()),
    })
}
