/// Authentication endpoints
///
/// - `POST /api/v1/auth/sign-up` - register a new account
/// - `POST /api/v1/auth/sign-in` - verify credentials, issue a token pair
/// - `POST /api/v1/auth/refresh` - rotate a refresh grant
/// - `POST /api/v1/auth/logout`  - revoke a refresh grant (protected)
///
/// Every failure on the refresh path (unknown token, expired grant,
/// fingerprint mismatch) renders the same unauthorized envelope: the client
/// learns only that it must sign in again.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::password,
    error::RepoResult,
    models::{
        refresh_session::RefreshSession,
        user::{CreateUser, User},
    },
    response::ApiResponse,
};
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Collapses domain-level repository failures into the uniform 401
///
/// Used on the credential and refresh paths, where "no such row" must be
/// indistinguishable from any other rejection. Storage failures still
/// surface as 500.
fn or_unauthorized<T>(result: RepoResult<T>) -> ApiResult<T> {
    result.map_err(|err| {
        if err.is_domain() {
            ApiError::Unauthorized
        } else {
            err.into()
        }
    })
}

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 3, max = 64, message = "login must be 3-64 characters"))]
    pub login: String,

    #[validate(email(message = "invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    /// Preferred interface language; defaults to "en"
    pub language: Option<String>,
}

/// Sign-in request
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub login: String,
    pub password: String,

    /// Device/browser binding for the refresh session
    pub fingerprint: String,
}

/// Token pair response payload
#[derive(Debug, Serialize)]
pub struct TokensResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
    pub fingerprint: String,
}

/// Logout request
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Registers a new user
///
/// # Errors
///
/// - `400` validation failed
/// - `409` login or email already taken
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<Json<ApiResponse>> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let hash = password::hash_password(&req.password)?;

    User::create(
        &state.db,
        CreateUser {
            login: req.login,
            email: req.email,
            password: hash,
            language: req.language.unwrap_or_else(|| "en".to_string()),
        },
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

/// Verifies credentials and issues a token pair
///
/// Persists the refresh grant bound to the supplied fingerprint and bumps
/// `last_seen_at`. A wrong login and a wrong password are indistinguishable
/// to the client.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<ApiResponse<TokensResponse>>> {
    let user = or_unauthorized(User::find_by_login(&state.db, &req.login).await)?;

    if !password::verify_password(&req.password, &user.password)? {
        return Err(ApiError::Unauthorized);
    }

    let pair = state.tokens.create_tokens_pair(user.id)?;

    RefreshSession::create(
        &state.db,
        RefreshSession {
            token: pair.refresh_token.clone(),
            user_id: user.id,
            expires_in: pair.refresh_expires_at,
            fingerprint: req.fingerprint,
        },
    )
    .await?;

    User::update_last_seen(&state.db, user.id).await?;

    Ok(Json(ApiResponse::with(TokensResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    })))
}

/// Rotates a refresh grant
///
/// The presented token is deleted first, so it can never be replayed: after
/// rotation the old value fails lookup and exactly one new value exists.
/// Expired grants and fingerprint mismatches also consume the session.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<TokensResponse>>> {
    let session = or_unauthorized(RefreshSession::find_by_token(&state.db, &req.refresh_token).await)?;

    // Rotation: the old grant dies no matter how the rest goes. A session
    // already consumed by a concurrent refresh renders the same 401 as an
    // unknown token.
    or_unauthorized(RefreshSession::delete(&state.db, &session.token).await)?;

    if session.is_expired() || session.fingerprint != req.fingerprint {
        return Err(ApiError::Unauthorized);
    }

    let pair = state.tokens.create_tokens_pair(session.user_id)?;

    RefreshSession::create(
        &state.db,
        RefreshSession {
            token: pair.refresh_token.clone(),
            user_id: session.user_id,
            expires_in: pair.refresh_expires_at,
            fingerprint: req.fingerprint,
        },
    )
    .await?;

    Ok(Json(ApiResponse::with(TokensResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    })))
}

/// Revokes a refresh grant
///
/// Succeeds even if the grant is already gone; logout is idempotent from
/// the client's point of view.
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> ApiResult<Json<ApiResponse>> {
    match RefreshSession::delete(&state.db, &req.refresh_token).await {
        Ok(()) => {}
        Err(err) if err.is_domain() => {}
        Err(err) => return Err(err.into()),
    }

    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_shared::error::RepoError;

    #[test]
    fn test_domain_failures_collapse_to_unauthorized() {
        // A refresh token consumed by a concurrent request surfaces as
        // NotFound from the rotation delete; it must render the uniform
        // 401, never a 404 naming the entity.
        let err = or_unauthorized::<()>(Err(RepoError::NotFound {
            entity: "refresh session",
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let err = or_unauthorized::<()>(Err(RepoError::NotFound { entity: "user" })).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_storage_failures_stay_internal() {
        let err = or_unauthorized::<()>(Err(RepoError::Storage {
            op: "refresh_sessions.delete",
            source: sqlx::Error::PoolClosed,
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_sign_up_validation() {
        let req = SignUpRequest {
            login: "al".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            language: None,
        };
        assert!(req.validate().is_err());

        let req = SignUpRequest {
            login: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "long-enough-password".to_string(),
            language: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_tokens_response_shape() {
        let body = serde_json::to_value(ApiResponse::with(TokensResponse {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        }))
        .unwrap();

        assert_eq!(body["status"], "OK");
        assert_eq!(body["access_token"], "a");
        assert_eq!(body["refresh_token"], "r");
    }
}
