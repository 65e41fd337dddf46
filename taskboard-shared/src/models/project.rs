/// Project and project membership models
///
/// A project has an owner and a name; membership is a join entity keyed by
/// `(project_id, user_id)` carrying an invitation status. Shared boards hang
/// off projects the way private boards hang off users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{fetch_error, insert_error, require_affected, require_rows, storage, RepoResult};

const PROJECT: &str = "project";
const MEMBER: &str = "project member";

/// Shared project owning boards and members
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: String,

    /// Owning user id
    pub owner: Uuid,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub owner: Uuid,
}

/// Invitation status of a member within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Invited but not yet accepted
    Invited,

    /// Active member
    Accepted,

    /// Declined the invitation
    Declined,
}

/// Membership join entity; unique per `(project_id, user_id)`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    pub project_id: i32,
    pub user_id: Uuid,
    pub status: MemberStatus,
}

impl Project {
    /// Creates a project and returns its generated id
    pub async fn create(pool: &PgPool, data: CreateProject) -> RepoResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO projects (name, description, owner)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.owner)
        .fetch_one(pool)
        .await
        .map_err(|e| insert_error(PROJECT, "projects.create", e))?;

        Ok(id)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> RepoResult<Self> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| fetch_error(PROJECT, "projects.find_by_id", e))
    }

    /// Projects owned by a user; empty → `NotFound`
    pub async fn list_owned_by(pool: &PgPool, owner: Uuid) -> RepoResult<Vec<Self>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner, created_at
            FROM projects
            WHERE owner = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("projects.list_owned_by", e))?;

        require_rows(PROJECT, projects)
    }

    pub async fn update(pool: &PgPool, id: i32, name: String, description: String) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $1, description = $2
            WHERE id = $3
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| storage("projects.update", e))?;

        require_affected(PROJECT, result)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("projects.delete", e))?;

        require_affected(PROJECT, result)
    }
}

impl ProjectMember {
    /// Adds a member; `AlreadyExists` if the `(project, user)` pair is taken
    pub async fn create(pool: &PgPool, member: ProjectMember) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO project_members (project_id, user_id, status)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(member.project_id)
        .bind(member.user_id)
        .bind(member.status)
        .execute(pool)
        .await
        .map_err(|e| insert_error(MEMBER, "project_members.create", e))?;

        Ok(())
    }

    pub async fn find(pool: &PgPool, project_id: i32, user_id: Uuid) -> RepoResult<Self> {
        sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, status
            FROM project_members
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| fetch_error(MEMBER, "project_members.find", e))
    }

    /// All members of a project; empty → `NotFound`
    pub async fn list_by_project(pool: &PgPool, project_id: i32) -> RepoResult<Vec<Self>> {
        let members = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, status
            FROM project_members
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("project_members.list_by_project", e))?;

        require_rows(MEMBER, members)
    }

    /// All memberships a user holds; empty → `NotFound`
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> RepoResult<Vec<Self>> {
        let members = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, status
            FROM project_members
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| storage("project_members.list_by_user", e))?;

        require_rows(MEMBER, members)
    }

    /// Updates the member's status (accept/decline an invitation)
    pub async fn update_status(
        pool: &PgPool,
        project_id: i32,
        user_id: Uuid,
        status: MemberStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE project_members
            SET status = $1
            WHERE project_id = $2 AND user_id = $3
            "#,
        )
        .bind(status)
        .bind(project_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| storage("project_members.update_status", e))?;

        require_affected(MEMBER, result)
    }

    pub async fn delete(pool: &PgPool, project_id: i32, user_id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            "DELETE FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| storage("project_members.delete", e))?;

        require_affected(MEMBER, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(MemberStatus::Invited).unwrap(),
            serde_json::json!("invited")
        );
        assert_eq!(
            serde_json::to_value(MemberStatus::Accepted).unwrap(),
            serde_json::json!("accepted")
        );
    }

    #[test]
    fn test_member_status_round_trip() {
        let status: MemberStatus = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(status, MemberStatus::Declined);
    }
}
