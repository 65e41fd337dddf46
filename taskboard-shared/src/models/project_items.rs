/// Project board hierarchy: boards, categories, tasks
///
/// Mirrors the private hierarchy, except boards hang off a project instead
/// of a user and tasks carry the project id for membership checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{fetch_error, insert_error, require_affected, require_rows, storage, RepoResult};

const BOARD: &str = "project board";
const CATEGORY: &str = "project category";
const TASK: &str = "project task";

/// Board shared within a project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectBoard {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub project_id: i32,
}

/// Category within a project board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectCategory {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub board_id: i32,
}

/// Task within a project board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectTask {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub status: bool,
    pub date_create: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub board_id: i32,
    pub category_id: i32,
    pub project_id: i32,
}

/// Input for creating a project task
#[derive(Debug, Clone)]
pub struct CreateProjectTask {
    pub name: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub board_id: i32,
    pub category_id: i32,
    pub project_id: i32,
}

/// Input for a full project-task update
#[derive(Debug, Clone)]
pub struct UpdateProjectTask {
    pub name: String,
    pub description: String,
    pub status: bool,
    pub deadline: DateTime<Utc>,
    pub board_id: i32,
    pub category_id: i32,
}

impl ProjectBoard {
    pub async fn create(pool: &PgPool, name: String, color: String, project_id: i32) -> RepoResult<()> {
        sqlx::query("INSERT INTO project_boards (name, color, project_id) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(color)
            .bind(project_id)
            .execute(pool)
            .await
            .map_err(|e| insert_error(BOARD, "project_boards.create", e))?;

        Ok(())
    }

    /// All boards of a project; empty → `NotFound`
    pub async fn list_by_project(pool: &PgPool, project_id: i32) -> RepoResult<Vec<Self>> {
        let boards = sqlx::query_as::<_, ProjectBoard>(
            "SELECT id, name, color, project_id FROM project_boards WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("project_boards.list_by_project", e))?;

        require_rows(BOARD, boards)
    }

    pub async fn update(pool: &PgPool, id: i32, name: String, color: String) -> RepoResult<()> {
        let result = sqlx::query("UPDATE project_boards SET name = $1, color = $2 WHERE id = $3")
            .bind(name)
            .bind(color)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("project_boards.update", e))?;

        require_affected(BOARD, result)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM project_boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("project_boards.delete", e))?;

        require_affected(BOARD, result)
    }
}

impl ProjectCategory {
    pub async fn create(pool: &PgPool, name: String, color: String, board_id: i32) -> RepoResult<()> {
        sqlx::query("INSERT INTO project_categories (name, color, board_id) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(color)
            .bind(board_id)
            .execute(pool)
            .await
            .map_err(|e| insert_error(CATEGORY, "project_categories.create", e))?;

        Ok(())
    }

    /// All categories of a board; empty → `NotFound`
    pub async fn list_by_board(pool: &PgPool, board_id: i32) -> RepoResult<Vec<Self>> {
        let categories = sqlx::query_as::<_, ProjectCategory>(
            "SELECT id, name, color, board_id FROM project_categories WHERE board_id = $1 ORDER BY id",
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("project_categories.list_by_board", e))?;

        require_rows(CATEGORY, categories)
    }

    pub async fn update(pool: &PgPool, id: i32, name: String, color: String) -> RepoResult<()> {
        let result =
            sqlx::query("UPDATE project_categories SET name = $1, color = $2 WHERE id = $3")
                .bind(name)
                .bind(color)
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| storage("project_categories.update", e))?;

        require_affected(CATEGORY, result)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM project_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("project_categories.delete", e))?;

        require_affected(CATEGORY, result)
    }
}

impl ProjectTask {
    pub async fn create(pool: &PgPool, data: CreateProjectTask) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO project_tasks (name, description, deadline, board_id, category_id, project_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.deadline)
        .bind(data.board_id)
        .bind(data.category_id)
        .bind(data.project_id)
        .execute(pool)
        .await
        .map_err(|e| insert_error(TASK, "project_tasks.create", e))?;

        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> RepoResult<Self> {
        sqlx::query_as::<_, ProjectTask>(
            r#"
            SELECT id, name, description, status, date_create, deadline,
                   board_id, category_id, project_id
            FROM project_tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| fetch_error(TASK, "project_tasks.find_by_id", e))
    }

    /// All tasks of a project regardless of board; empty → `NotFound`
    pub async fn list_by_project(pool: &PgPool, project_id: i32) -> RepoResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, ProjectTask>(
            r#"
            SELECT id, name, description, status, date_create, deadline,
                   board_id, category_id, project_id
            FROM project_tasks
            WHERE project_id = $1
            ORDER BY id
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("project_tasks.list_by_project", e))?;

        require_rows(TASK, tasks)
    }

    /// All tasks of a board; empty → `NotFound`
    pub async fn list_by_board(pool: &PgPool, board_id: i32) -> RepoResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, ProjectTask>(
            r#"
            SELECT id, name, description, status, date_create, deadline,
                   board_id, category_id, project_id
            FROM project_tasks
            WHERE board_id = $1
            ORDER BY id
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("project_tasks.list_by_board", e))?;

        require_rows(TASK, tasks)
    }

    /// All tasks of a category; empty → `NotFound`
    pub async fn list_by_category(pool: &PgPool, category_id: i32) -> RepoResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, ProjectTask>(
            r#"
            SELECT id, name, description, status, date_create, deadline,
                   board_id, category_id, project_id
            FROM project_tasks
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("project_tasks.list_by_category", e))?;

        require_rows(TASK, tasks)
    }

    pub async fn update(pool: &PgPool, id: i32, data: UpdateProjectTask) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE project_tasks
            SET name = $1, description = $2, status = $3, deadline = $4,
                board_id = $5, category_id = $6
            WHERE id = $7
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .bind(data.deadline)
        .bind(data.board_id)
        .bind(data.category_id)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| storage("project_tasks.update", e))?;

        require_affected(TASK, result)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM project_tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("project_tasks.delete", e))?;

        require_affected(TASK, result)
    }
}
