use std::sync::Arc;

use auth::TokenService;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

const BEARER: &str = "Bearer";

/// Verified identity, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Middleware that validates the bearer token and adds the subject to request
/// extensions. Any failure ends the request with 401 before the handler runs.
pub async fn authenticate(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        unauthorized(&e.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
    });

    Ok(next.run(req).await)
}

/// The header must be exactly `Bearer <token>`.
fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match header.split_whitespace().collect::<Vec<_>>().as_slice() {
        [BEARER, token] => Ok(*token),
        _ => {
            tracing::warn!("Rejected request with missing or malformed Authorization header");
            Err(unauthorized("Unauthorized."))
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use axum::body::Body;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, Duration::minutes(5)))
    }

    fn app(tokens: Arc<TokenService>, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(move |Extension(user): Extension<AuthenticatedUser>| {
                    let hits = Arc::clone(&hits);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        user.user_id
                    }
                }),
            )
            .route_layer(middleware::from_fn_with_state(tokens, authenticate))
    }

    async fn call(authorization: Option<String>) -> (StatusCode, String, usize) {
        let hits = Arc::new(AtomicUsize::new(0));
        let tokens = tokens();
        let token = tokens.issue("user123").unwrap();

        let mut request = http::Request::builder().uri("/protected");
        if let Some(value) = authorization {
            request = request.header(
                http::header::AUTHORIZATION,
                value.replace("{token}", &token),
            );
        }

        let response = app(tokens, Arc::clone(&hits))
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (
            status,
            String::from_utf8(body.to_vec()).unwrap(),
            hits.load(Ordering::SeqCst),
        )
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let (status, body, hits) = call(Some("Bearer {token}".to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "user123");
        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, body, hits) = call(None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":"Unauthorized."}"#);
        assert_eq!(hits, 0);
    }

    #[tokio::test]
    async fn test_malformed_headers() {
        for header in [
            "{token}",
            "Basic {token}",
            "bearer {token}",
            "Bearer",
            "Bearer {token} extra",
        ] {
            let (status, _, hits) = call(Some(header.to_string())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {header}");
            assert_eq!(hits, 0, "header: {header}");
        }
    }

    #[tokio::test]
    async fn test_extra_whitespace_is_accepted() {
        let (status, _, hits) = call(Some("  Bearer   {token} ".to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn test_garbled_token() {
        let (status, body, hits) = call(Some("Bearer not.a.token".to_string())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Token is invalid"));
        assert_eq!(hits, 0);
    }

    #[tokio::test]
    async fn test_token_from_other_secret() {
        let other = TokenService::new(b"another_secret_key_at_least_32_bytes", Duration::minutes(5));
        let token = other.issue("user123").unwrap();

        let (status, _, hits) = call(Some(format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(hits, 0);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let expired = TokenService::new(SECRET, Duration::seconds(-1));
        let token = expired.issue("user123").unwrap();

        let (status, body, hits) = call(Some(format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":"Token is expired"}"#);
        assert_eq!(hits, 0);
    }
}
