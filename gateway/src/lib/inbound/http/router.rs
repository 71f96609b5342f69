use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::get_users::get_users;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use crate::domain::auth::service::LoginService;
use crate::domain::context::OperationContext;
use crate::domain::user::ports::UserServicePort;

/// Application state shared by every handler.
pub struct AppState<U: UserServicePort> {
    pub user_service: Arc<U>,
    pub login_service: Arc<LoginService<U>>,
    pub token_service: Arc<TokenService>,
    pub request_timeout: Duration,
}

impl<U: UserServicePort> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            login_service: Arc::clone(&self.login_service),
            token_service: Arc::clone(&self.token_service),
            request_timeout: self.request_timeout,
        }
    }
}

impl<U: UserServicePort> AppState<U> {
    /// Fresh context for one request, bounded by the configured timeout.
    pub fn context(&self) -> OperationContext {
        OperationContext::with_timeout(self.request_timeout)
    }
}

pub fn create_router<U: UserServicePort>(
    user_service: Arc<U>,
    token_service: Arc<TokenService>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        login_service: Arc::new(LoginService::new(
            Arc::clone(&user_service),
            Arc::clone(&token_service),
        )),
        user_service,
        token_service,
        request_timeout,
    };

    let public_routes = Router::new()
        .route("/login", post(login::<U>))
        .route("/users", post(create_user::<U>))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/users", get(get_users::<U>))
        .route(
            "/users/:id",
            get(get_user::<U>)
                .patch(update_user::<U>)
                .delete(delete_user::<U>),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.token_service),
            authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let api_routes = public_routes.merge(protected_routes);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
