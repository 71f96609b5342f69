use crate::domain::context::OperationContext;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::GetUsersRequest;
use crate::proto::GetUsersResponse;
use crate::user::errors::UserError;

use super::non_empty;

pub async fn get_users<S: UserServicePort>(
    service: &S,
    ctx: &OperationContext,
    request: GetUsersRequest,
) -> Result<GetUsersResponse, UserError> {
    let filter = UserFilter {
        id: non_empty(request.id)
            .map(|id| UserId::from_string(&id))
            .transpose()?,
        name: non_empty(request.name),
        email: non_empty(request.email)
            .map(EmailAddress::new)
            .transpose()?,
    };

    let users = service.list_users(ctx, filter).await?;

    Ok(GetUsersResponse {
        data: users.into_iter().map(Into::into).collect(),
    })
}
