use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::MessageResponseData;
use crate::domain::user::models::NewUser;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Public registration endpoint.
pub async fn create_user<U: UserServicePort>(
    State(state): State<AppState<U>>,
    JsonBody(body): JsonBody<CreateUserRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let new_user = NewUser::new(body.name, body.email, body.password, body.created_by)?;
    let ctx = state.context();

    let user = state.user_service.create_user(&ctx, new_user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData::new("Register success"),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequestBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    created_by: Option<String>,
}
