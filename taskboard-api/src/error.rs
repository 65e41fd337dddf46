/// Error handling for the API server
///
/// Handlers return `Result<T, ApiError>`; the `IntoResponse` impl renders
/// the shared JSON envelope and picks the status code. Repository errors
/// map category-for-category: `AlreadyExists` → 409, `NotFound` → 404,
/// `Storage` → 500 with an opaque message (the wrapped error is logged
/// server-side, never sent to the client).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use taskboard_shared::{
    auth::{jwt::TokenError, password::PasswordError},
    error::RepoError,
    response::ApiResponse,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401); always rendered with the fixed message
    Unauthorized,

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409), e.g. duplicate login
    Conflict(String),

    /// Internal server error (500); detail is logged, not exposed
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiResponse::error(msg)),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, ApiResponse::unauthorized()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiResponse::error(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::error(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiResponse::error(msg)),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("internal error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::AlreadyExists { .. } => ApiError::Conflict(err.to_string()),
            RepoError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            RepoError::Storage { ref op, ref source } => {
                ApiError::Internal(format!("{}: {}", op, source))
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => ApiError::Unauthorized,
            TokenError::Signing(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let err: ApiError = RepoError::AlreadyExists { entity: "user" }.into();
        assert!(matches!(err, ApiError::Conflict(msg) if msg == "user already exists"));

        let err: ApiError = RepoError::NotFound { entity: "private task" }.into();
        assert!(matches!(err, ApiError::NotFound(msg) if msg == "private task not found"));

        let err: ApiError = RepoError::Storage {
            op: "users.create",
            source: sqlx::Error::PoolClosed,
        }
        .into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_token_error_mapping() {
        let err: ApiError = TokenError::Invalid.into();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn test_status_codes() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError::Conflict("taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = ApiError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Internal("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // Internal detail must not leak into the body
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!body.contains("secret detail"));
        assert_eq!(body, r#"{"status":"Error","error":"internal error"}"#);
    }
}
