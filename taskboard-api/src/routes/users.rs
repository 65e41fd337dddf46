/// User profile endpoints
///
/// - `GET /api/v1/users/me` - current profile
/// - `PUT /api/v1/users/me` - full profile update
/// - `DELETE /api/v1/users/me` - delete the account (cascades)
/// - `GET /api/v1/users` - list all users (admin only)

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{middleware::AuthUser, password},
    models::user::{UpdateUser, User},
    response::ApiResponse,
};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Profile update request; all fields required (full replace)
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub login: String,
    pub email: String,

    /// New plaintext password, hashed before storage
    pub password: String,

    pub language: String,
    pub theme: String,
    pub about: String,
}

/// Single-user payload
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// User list payload
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

pub async fn me(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = User::find_by_id(&state.db, user_id).await?;

    Ok(Json(ApiResponse::with(UserResponse { user })))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<UpdateMeRequest>,
) -> ApiResult<Json<ApiResponse>> {
    let hash = password::hash_password(&req.password)?;

    User::update(
        &state.db,
        user_id,
        UpdateUser {
            login: req.login,
            email: req.email,
            password: hash,
            language: req.language,
            theme: req.theme,
            about: req.about,
        },
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<ApiResponse>> {
    User::delete(&state.db, user_id).await?;

    Ok(Json(ApiResponse::ok()))
}

/// Lists all users; requires the admin flag
pub async fn list_users(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<ApiResponse<UsersResponse>>> {
    let caller = User::find_by_id(&state.db, user_id).await?;
    if !caller.is_admin {
        return Err(ApiError::Forbidden("admin access required".to_string()));
    }

    let users = User::list(&state.db).await?;

    Ok(Json(ApiResponse::with(UsersResponse { users })))
}
