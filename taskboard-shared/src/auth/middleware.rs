/// Bearer-token authentication middleware for Axum
///
/// Per request: extract the `Authorization` header, require the `Bearer`
/// scheme with a non-empty token, verify it with the [`TokenManager`], and
/// bind the resolved user id into the request extensions as [`AuthUser`].
/// Any failed step short-circuits the chain with `401` and the fixed
/// unauthorized envelope; the inner handler never runs.
///
/// Rejections are logged at `info` — unauthenticated traffic (probes,
/// expired sessions) is routine, not an error condition.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{middleware, routing::get, Extension, Router};
/// use chrono::Duration;
/// use taskboard_shared::auth::{jwt::TokenManager, middleware::{require_auth, AuthUser}};
///
/// async fn me(Extension(AuthUser(user_id)): Extension<AuthUser>) -> String {
///     user_id.to_string()
/// }
///
/// let manager = Arc::new(TokenManager::new(
///     "secret-key-at-least-32-bytes-long!!",
///     Duration::minutes(15),
///     Duration::days(30),
/// ));
///
/// let app: Router = Router::new()
///     .route("/me", get(me))
///     .layer(middleware::from_fn(require_auth(manager)));
/// ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use super::jwt::TokenManager;
use crate::response::ApiResponse;

/// Authenticated identity bound into request extensions
///
/// Handlers behind [`require_auth`] extract it with `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

/// Rejection emitted when authentication fails
///
/// Always renders the same `401` body regardless of which step failed.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(ApiResponse::unauthorized())).into_response()
    }
}

/// Creates the authentication middleware closure
///
/// Captures a shared [`TokenManager`] and returns a function suitable for
/// `axum::middleware::from_fn`.
pub fn require_auth(
    manager: Arc<TokenManager>,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AuthRejection>> + Send>>
       + Clone {
    move |req, next| {
        let manager = manager.clone();
        Box::pin(auth_middleware(manager, req, next))
    }
}

async fn auth_middleware(
    manager: Arc<TokenManager>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let user_id = match authenticate(&manager, &req) {
        Ok(user_id) => user_id,
        Err(reason) => {
            tracing::info!(reason, path = %req.uri().path(), "authorization rejected");
            return Err(AuthRejection);
        }
    };

    req.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(req).await)
}

/// Runs the header → scheme → token checks and returns the asserted user id
///
/// The error value is the rejection reason for the log line only; it is
/// never surfaced to the client.
fn authenticate(manager: &TokenManager, req: &Request) -> Result<Uuid, &'static str> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or("missing authorization header")?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or("expected bearer scheme")?;

    if token.is_empty() {
        return Err("empty bearer token");
    }

    manager.parse(token).map_err(|_| "token verification failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Extension, Router};
    use chrono::Duration;
    use tower::ServiceExt;

    fn test_manager() -> Arc<TokenManager> {
        Arc::new(TokenManager::new(
            "test-secret-key-at-least-32-bytes-long",
            Duration::minutes(15),
            Duration::days(30),
        ))
    }

    fn protected_app(manager: Arc<TokenManager>) -> Router {
        async fn handler(Extension(AuthUser(user_id)): Extension<AuthUser>) -> String {
            user_id.to_string()
        }

        Router::new()
            .route("/protected", get(handler))
            .layer(middleware::from_fn(require_auth(manager)))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let app = protected_app(test_manager());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            r#"{"status":"Error","error":"unauthorized"}"#
        );
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_rejected() {
        let app = protected_app(test_manager());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let app = protected_app(test_manager());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, "Bearer ")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let app = protected_app(test_manager());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_binds_user_id() {
        let manager = test_manager();
        let app = protected_app(manager.clone());

        let user_id = Uuid::new_v4();
        let pair = manager.create_tokens_pair(user_id).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header(header::AUTHORIZATION, format!("Bearer {}", pair.access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, user_id.to_string());
    }
}
