/// Private board hierarchy endpoints
///
/// Thin glue: decode the request, call the repository, wrap the outcome in
/// the envelope. Ownership flows from the authenticated user id bound by
/// the middleware; boards and tasks are always created under the caller.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthUser,
    models::private::{
        CreatePrivateTask, PrivateBoard, PrivateCategory, PrivateTask, UpdatePrivateTask,
    },
    response::ApiResponse,
};

use crate::{app::AppState, error::ApiResult};

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub board_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: i32,
    pub board_id: i32,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: bool,
    pub category_id: i32,
    pub board_id: i32,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BoardsResponse {
    pub boards: Vec<PrivateBoard>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<PrivateCategory>,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<PrivateTask>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: PrivateTask,
}

pub async fn create_board(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateBoard::create(&state.db, req.name, req.color, user_id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn list_boards(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<ApiResponse<BoardsResponse>>> {
    let boards = PrivateBoard::list_by_user(&state.db, user_id).await?;

    Ok(Json(ApiResponse::with(BoardsResponse { boards })))
}

pub async fn update_board(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateBoard::update(&state.db, id, req.name, req.color).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_board(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateBoard::delete(&state.db, id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateCategory::create(&state.db, req.name, req.color, req.board_id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Path(board_id): Path<i32>,
) -> ApiResult<Json<ApiResponse<CategoriesResponse>>> {
    let categories = PrivateCategory::list_by_board(&state.db, board_id).await?;

    Ok(Json(ApiResponse::with(CategoriesResponse { categories })))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateCategory::update(&state.db, id, req.name, req.color).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateCategory::delete(&state.db, id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateTask::create(
        &state.db,
        CreatePrivateTask {
            category_id: req.category_id,
            name: req.name,
            description: req.description,
            deadline: req.deadline,
            user_id,
            board_id: req.board_id,
        },
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<TaskResponse>>> {
    let task = PrivateTask::find_by_id(&state.db, id).await?;

    Ok(Json(ApiResponse::with(TaskResponse { task })))
}

/// Every task the caller owns, across all boards
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<ApiResponse<TasksResponse>>> {
    let tasks = PrivateTask::list_by_user(&state.db, user_id).await?;

    Ok(Json(ApiResponse::with(TasksResponse { tasks })))
}

pub async fn list_board_tasks(
    State(state): State<AppState>,
    Path(board_id): Path<i32>,
) -> ApiResult<Json<ApiResponse<TasksResponse>>> {
    let tasks = PrivateTask::list_by_board(&state.db, board_id).await?;

    Ok(Json(ApiResponse::with(TasksResponse { tasks })))
}

pub async fn list_category_tasks(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> ApiResult<Json<ApiResponse<TasksResponse>>> {
    let tasks = PrivateTask::list_by_category(&state.db, category_id).await?;

    Ok(Json(ApiResponse::with(TasksResponse { tasks })))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateTask::update(
        &state.db,
        id,
        UpdatePrivateTask {
            category_id: req.category_id,
            name: req.name,
            description: req.description,
            status: req.status,
            deadline: req.deadline,
            board_id: req.board_id,
        },
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse>> {
    PrivateTask::delete(&state.db, id).await?;

    Ok(Json(ApiResponse::ok()))
}
