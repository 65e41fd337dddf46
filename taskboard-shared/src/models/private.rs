/// Private board hierarchy: boards, categories, tasks
///
/// Strict containment: a private board belongs to one user, a category to
/// one board, a task to one category and one board. Parent deletion cascades
/// in the schema, so the repositories never orphan children.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{fetch_error, insert_error, require_affected, require_rows, storage, RepoResult};

const BOARD: &str = "private board";
const CATEGORY: &str = "private category";
const TASK: &str = "private task";

/// Board owned privately by a single user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrivateBoard {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub user_id: Uuid,
}

/// Category within a private board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrivateCategory {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub board_id: i32,
}

/// Task within a private board, assigned to one category
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrivateTask {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,

    /// Completion flag
    pub status: bool,

    pub date_create: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub user_id: Uuid,
    pub board_id: i32,
}

/// Input for creating a private task
#[derive(Debug, Clone)]
pub struct CreatePrivateTask {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub user_id: Uuid,
    pub board_id: i32,
}

/// Input for a full task update
#[derive(Debug, Clone)]
pub struct UpdatePrivateTask {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub status: bool,
    pub deadline: DateTime<Utc>,
    pub board_id: i32,
}

impl PrivateBoard {
    pub async fn create(pool: &PgPool, name: String, color: String, user_id: Uuid) -> RepoResult<()> {
        sqlx::query("INSERT INTO private_boards (name, color, user_id) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(color)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| insert_error(BOARD, "private_boards.create", e))?;

        Ok(())
    }

    /// All boards of a user; empty → `NotFound`
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> RepoResult<Vec<Self>> {
        let boards = sqlx::query_as::<_, PrivateBoard>(
            "SELECT id, name, color, user_id FROM private_boards WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("private_boards.list_by_user", e))?;

        require_rows(BOARD, boards)
    }

    pub async fn update(pool: &PgPool, id: i32, name: String, color: String) -> RepoResult<()> {
        let result = sqlx::query("UPDATE private_boards SET name = $1, color = $2 WHERE id = $3")
            .bind(name)
            .bind(color)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("private_boards.update", e))?;

        require_affected(BOARD, result)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM private_boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("private_boards.delete", e))?;

        require_affected(BOARD, result)
    }
}

impl PrivateCategory {
    pub async fn create(pool: &PgPool, name: String, color: String, board_id: i32) -> RepoResult<()> {
        sqlx::query("INSERT INTO private_categories (name, color, board_id) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(color)
            .bind(board_id)
            .execute(pool)
            .await
            .map_err(|e| insert_error(CATEGORY, "private_categories.create", e))?;

        Ok(())
    }

    /// All categories of a board; empty → `NotFound`
    pub async fn list_by_board(pool: &PgPool, board_id: i32) -> RepoResult<Vec<Self>> {
        let categories = sqlx::query_as::<_, PrivateCategory>(
            "SELECT id, name, color, board_id FROM private_categories WHERE board_id = $1 ORDER BY id",
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("private_categories.list_by_board", e))?;

        require_rows(CATEGORY, categories)
    }

    pub async fn update(pool: &PgPool, id: i32, name: String, color: String) -> RepoResult<()> {
        let result =
            sqlx::query("UPDATE private_categories SET name = $1, color = $2 WHERE id = $3")
                .bind(name)
                .bind(color)
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| storage("private_categories.update", e))?;

        require_affected(CATEGORY, result)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM private_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("private_categories.delete", e))?;

        require_affected(CATEGORY, result)
    }
}

impl PrivateTask {
    pub async fn create(pool: &PgPool, data: CreatePrivateTask) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO private_tasks (category_id, name, description, deadline, user_id, board_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(data.category_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.deadline)
        .bind(data.user_id)
        .bind(data.board_id)
        .execute(pool)
        .await
        .map_err(|e| insert_error(TASK, "private_tasks.create", e))?;

        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> RepoResult<Self> {
        sqlx::query_as::<_, PrivateTask>(
            r#"
            SELECT id, category_id, name, description, status, date_create, deadline,
                   user_id, board_id
            FROM private_tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| fetch_error(TASK, "private_tasks.find_by_id", e))
    }

    /// All of a user's tasks across every board; empty → `NotFound`
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> RepoResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, PrivateTask>(
            r#"
            SELECT id, category_id, name, description, status, date_create, deadline,
                   user_id, board_id
            FROM private_tasks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("private_tasks.list_by_user", e))?;

        require_rows(TASK, tasks)
    }

    /// All tasks of a board; empty → `NotFound`
    pub async fn list_by_board(pool: &PgPool, board_id: i32) -> RepoResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, PrivateTask>(
            r#"
            SELECT id, category_id, name, description, status, date_create, deadline,
                   user_id, board_id
            FROM private_tasks
            WHERE board_id = $1
            ORDER BY id
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("private_tasks.list_by_board", e))?;

        require_rows(TASK, tasks)
    }

    /// All tasks of a category; empty → `NotFound`
    pub async fn list_by_category(pool: &PgPool, category_id: i32) -> RepoResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, PrivateTask>(
            r#"
            SELECT id, category_id, name, description, status, date_create, deadline,
                   user_id, board_id
            FROM private_tasks
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("private_tasks.list_by_category", e))?;

        require_rows(TASK, tasks)
    }

    pub async fn update(pool: &PgPool, id: i32, data: UpdatePrivateTask) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE private_tasks
            SET category_id = $1, name = $2, description = $3, status = $4,
                deadline = $5, board_id = $6
            WHERE id = $7
            "#,
        )
        .bind(data.category_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .bind(data.deadline)
        .bind(data.board_id)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| storage("private_tasks.update", e))?;

        require_affected(TASK, result)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM private_tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("private_tasks.delete", e))?;

        require_affected(TASK, result)
    }
}
