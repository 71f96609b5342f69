use crate::domain::context::OperationContext;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::user::errors::UserError;

/// Resolve credentials to a user id. Token issuance is the caller's job.
pub async fn login<S: UserServicePort>(
    service: &S,
    ctx: &OperationContext,
    request: LoginRequest,
) -> Result<LoginResponse, UserError> {
    let email = EmailAddress::new(request.email)?;
    let user = service.login(ctx, &email, &request.password).await?;

    Ok(LoginResponse {
        user_id: user.id.to_string(),
    })
}
