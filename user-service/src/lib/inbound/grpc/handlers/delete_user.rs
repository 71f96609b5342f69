use crate::domain::context::OperationContext;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::DeleteUserRequest;
use crate::proto::DeleteUserResponse;
use crate::user::errors::UserError;

pub async fn delete_user<S: UserServicePort>(
    service: &S,
    ctx: &OperationContext,
    request: DeleteUserRequest,
) -> Result<DeleteUserResponse, UserError> {
    let user_id = UserId::from_string(&request.id)?;
    service.delete_user(ctx, &user_id).await?;

    Ok(DeleteUserResponse {})
}
