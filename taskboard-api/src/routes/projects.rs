/// Project endpoints: projects, members, and the shared board hierarchy
///
/// Creating a project also records the creator as an accepted member so
/// membership lookups stay uniform. Mutating routes check that the caller
/// is an accepted member (or the owner for project-level changes) before
/// touching the hierarchy.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthUser,
    models::{
        project::{CreateProject, MemberStatus, Project, ProjectMember},
        project_items::{
            CreateProjectTask, ProjectBoard, ProjectCategory, ProjectTask, UpdateProjectTask,
        },
    },
    response::ApiResponse,
};
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    pub status: MemberStatus,
}

#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: i32,
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
pub struct ProjectIdResponse {
    pub project_id: i32,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub members: Vec<ProjectMember>,
}

#[derive(Debug, Serialize)]
pub struct BoardsResponse {
    pub boards: Vec<ProjectBoard>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<ProjectCategory>,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<ProjectTask>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: ProjectTask,
}

/// Requires the caller to be an accepted member of the project
async fn require_member(state: &AppState, project_id: i32, user_id: Uuid) -> ApiResult<()> {
    let member = match ProjectMember::find(&state.db, project_id, user_id).await {
        Ok(member) => member,
        Err(err) if err.is_domain() => {
            return Err(ApiError::Forbidden("not a project member".to_string()))
        }
        Err(err) => return Err(err.into()),
    };

    if member.status != MemberStatus::Accepted {
        return Err(ApiError::Forbidden("membership not accepted".to_string()));
    }

    Ok(())
}

/// Requires the caller to own the project
async fn require_owner(state: &AppState, project_id: i32, user_id: Uuid) -> ApiResult<()> {
    let project = Project::find_by_id(&state.db, project_id).await?;
    if project.owner != user_id {
        return Err(ApiError::Forbidden("project owner required".to_string()));
    }

    Ok(())
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<ApiResponse<ProjectIdResponse>>> {
    let project_id = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            owner: user_id,
        },
    )
    .await?;

    ProjectMember::create(
        &state.db,
        ProjectMember {
            project_id,
            user_id,
            status: MemberStatus::Accepted,
        },
    )
    .await?;

    Ok(Json(ApiResponse::with(ProjectIdResponse { project_id })))
}

pub async fn list_projects(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<ApiResponse<ProjectsResponse>>> {
    let projects = Project::list_owned_by(&state.db, user_id).await?;

    Ok(Json(ApiResponse::with(ProjectsResponse { projects })))
}

/// All memberships the caller holds across projects
pub async fn list_memberships(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> ApiResult<Json<ApiResponse<MembersResponse>>> {
    let members = ProjectMember::list_by_user(&state.db, user_id).await?;

    Ok(Json(ApiResponse::with(MembersResponse { members })))
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<ProjectResponse>>> {
    require_member(&state, id, user_id).await?;

    let project = Project::find_by_id(&state.db, id).await?;

    Ok(Json(ApiResponse::with(ProjectResponse { project })))
}

pub async fn update_project(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_owner(&state, id, user_id).await?;

    Project::update(&state.db, id, req.name, req.description).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse>> {
    require_owner(&state, id, user_id).await?;

    Project::delete(&state.db, id).await?;

    Ok(Json(ApiResponse::ok()))
}

/// Invites a user; the invitee accepts or declines via the update route
pub async fn add_member(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_owner(&state, id, user_id).await?;

    ProjectMember::create(
        &state.db,
        ProjectMember {
            project_id: id,
            user_id: req.user_id,
            status: MemberStatus::Invited,
        },
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn list_members(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<MembersResponse>>> {
    require_member(&state, id, user_id).await?;

    let members = ProjectMember::list_by_project(&state.db, id).await?;

    Ok(Json(ApiResponse::with(MembersResponse { members })))
}

/// Accept/decline an invitation, or owner-side status changes
pub async fn update_member(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path((id, member_id)): Path<(i32, Uuid)>,
    Json(req): Json<UpdateMemberRequest>,
) -> ApiResult<Json<ApiResponse>> {
    // A member may change their own status; anyone else must own the project
    if caller != member_id {
        require_owner(&state, id, caller).await?;
    }

    ProjectMember::update_status(&state.db, id, member_id, req.status).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn remove_member(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path((id, member_id)): Path<(i32, Uuid)>,
) -> ApiResult<Json<ApiResponse>> {
    // Leaving a project is allowed; removing someone else is owner-only
    if caller != member_id {
        require_owner(&state, id, caller).await?;
    }

    ProjectMember::delete(&state.db, id, member_id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn create_board(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectBoard::create(&state.db, req.name, req.color, id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn list_boards(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<BoardsResponse>>> {
    require_member(&state, id, user_id).await?;

    let boards = ProjectBoard::list_by_project(&state.db, id).await?;

    Ok(Json(ApiResponse::with(BoardsResponse { boards })))
}

pub async fn update_board(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, board_id)): Path<(i32, i32)>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectBoard::update(&state.db, board_id, req.name, req.color).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_board(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, board_id)): Path<(i32, i32)>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectBoard::delete(&state.db, board_id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, board_id)): Path<(i32, i32)>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectCategory::create(&state.db, req.name, req.color, board_id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, board_id)): Path<(i32, i32)>,
) -> ApiResult<Json<ApiResponse<CategoriesResponse>>> {
    require_member(&state, id, user_id).await?;

    let categories = ProjectCategory::list_by_board(&state.db, board_id).await?;

    Ok(Json(ApiResponse::with(CategoriesResponse { categories })))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, category_id)): Path<(i32, i32)>,
    Json(req): Json<BoardRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectCategory::update(&state.db, category_id, req.name, req.color).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, category_id)): Path<(i32, i32)>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectCategory::delete(&state.db, category_id).await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, board_id)): Path<(i32, i32)>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectTask::create(
        &state.db,
        CreateProjectTask {
            name: req.name,
            description: req.description,
            deadline: req.deadline,
            board_id,
            category_id: req.category_id,
            project_id: id,
        },
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

/// Every task of the project, across all of its boards
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<TasksResponse>>> {
    require_member(&state, id, user_id).await?;

    let tasks = ProjectTask::list_by_project(&state.db, id).await?;

    Ok(Json(ApiResponse::with(TasksResponse { tasks })))
}

pub async fn list_board_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, board_id)): Path<(i32, i32)>,
) -> ApiResult<Json<ApiResponse<TasksResponse>>> {
    require_member(&state, id, user_id).await?;

    let tasks = ProjectTask::list_by_board(&state.db, board_id).await?;

    Ok(Json(ApiResponse::with(TasksResponse { tasks })))
}

pub async fn list_category_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, category_id)): Path<(i32, i32)>,
) -> ApiResult<Json<ApiResponse<TasksResponse>>> {
    require_member(&state, id, user_id).await?;

    let tasks = ProjectTask::list_by_category(&state.db, category_id).await?;

    Ok(Json(ApiResponse::with(TasksResponse { tasks })))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, task_id)): Path<(i32, i32)>,
) -> ApiResult<Json<ApiResponse<TaskResponse>>> {
    require_member(&state, id, user_id).await?;

    let task = ProjectTask::find_by_id(&state.db, task_id).await?;

    Ok(Json(ApiResponse::with(TaskResponse { task })))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, task_id)): Path<(i32, i32)>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectTask::update(
        &state.db,
        task_id,
        UpdateProjectTask {
            name: req.name,
            description: req.description,
            status: req.status,
            deadline: req.deadline,
            board_id: req.board_id,
            category_id: req.category_id,
        },
    )
    .await?;

    Ok(Json(ApiResponse::ok()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path((id, task_id)): Path<(i32, i32)>,
) -> ApiResult<Json<ApiResponse>> {
    require_member(&state, id, user_id).await?;

    ProjectTask::delete(&state.db, task_id).await?;

    Ok(Json(ApiResponse::ok()))
}
