use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Cookie carrying the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "_uac";

pub async fn login<U: UserServicePort>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    JsonBody(body): JsonBody<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let ctx = state.context();

    let access_token = state
        .login_service
        .login(&ctx, body.email, body.password)
        .await?;

    let max_age = state.token_service.ttl().to_std().unwrap_or_default();
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age.try_into().unwrap_or_default());

    Ok((
        jar.add(cookie),
        ApiSuccess::new(StatusCode::OK, LoginResponseData { access_token }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
}
