use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::MessageResponseData;
use crate::domain::user::models::UserChanges;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Partial update; absent or blank fields are left alone.
pub async fn update_user<U: UserServicePort>(
    State(state): State<AppState<U>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    JsonBody(body): JsonBody<UpdateUserRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let changes = UserChanges::new(body.name, body.email, body.password)?;
    let ctx = state.context();

    state
        .user_service
        .update_user(&ctx, &user_id, changes)
        .await?;
    tracing::info!(user_id = %user_id, updated_by = %auth_user.user_id, "User updated");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData::new("Update success"),
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequestBody {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}
