use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Soft delete. The record stays readable by id.
pub async fn delete_user<U: UserServicePort>(
    State(state): State<AppState<U>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let ctx = state.context();

    state.user_service.delete_user(&ctx, &user_id).await?;
    tracing::info!(user_id = %user_id, deleted_by = %auth_user.user_id, "User deleted");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData::new("Delete success"),
    ))
}
