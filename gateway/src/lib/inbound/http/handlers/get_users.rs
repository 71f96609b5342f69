use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::QueryParams;
use super::UserData;
use crate::domain::user::models::UserFilter;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_users<U: UserServicePort>(
    State(state): State<AppState<U>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    QueryParams(query): QueryParams<GetUsersQuery>,
) -> Result<ApiSuccess<GetUsersResponseData>, ApiError> {
    let filter = UserFilter::new(query.name, query.email)?;
    let ctx = state.context();

    tracing::debug!(requested_by = %auth_user.user_id, filter = ?filter, "Listing users");

    let users = state.user_service.list_users(&ctx, filter).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GetUsersResponseData {
            data: users.into_iter().map(UserData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GetUsersQuery {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUsersResponseData {
    pub data: Vec<UserData>,
}
