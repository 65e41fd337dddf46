/// User model and database operations
///
/// A user owns private boards and participates in projects. `login` and
/// `email` are unique; the password column holds an Argon2id hash, never
/// plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     login VARCHAR(64) NOT NULL UNIQUE,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL,
///     is_admin BOOLEAN NOT NULL DEFAULT FALSE,
///     language VARCHAR(8) NOT NULL DEFAULT 'en',
///     theme VARCHAR(16) NOT NULL DEFAULT 'light',
///     about TEXT NOT NULL DEFAULT '',
///     registered_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_seen_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{fetch_error, insert_error, require_affected, require_rows, storage, RepoResult};

const ENTITY: &str = "user";

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Unique login name
    pub login: String,

    /// Unique email address
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password: String,

    pub is_admin: bool,

    /// Profile preferences
    pub language: String,
    pub theme: String,
    pub about: String,

    pub registered_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub login: String,
    pub email: String,

    /// Argon2id hash, not the plaintext password
    pub password: String,

    pub language: String,
}

/// Input for a full profile update
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub login: String,
    pub email: String,
    pub password: String,
    pub language: String,
    pub theme: String,
    pub about: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the login or email is taken; `Storage` otherwise.
    pub async fn create(pool: &PgPool, data: CreateUser) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (login, email, password, language)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(data.login)
        .bind(data.email)
        .bind(data.password)
        .bind(data.language)
        .execute(pool)
        .await
        .map_err(|e| insert_error(ENTITY, "users.create", e))?;

        Ok(())
    }

    /// Looks up a user by id; `NotFound` if the id does not exist
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> RepoResult<Self> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, email, password, is_admin, language, theme, about,
                   registered_at, last_seen_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| fetch_error(ENTITY, "users.find_by_id", e))
    }

    /// Looks up a user by login; `NotFound` if no such login exists
    pub async fn find_by_login(pool: &PgPool, login: &str) -> RepoResult<Self> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, email, password, is_admin, language, theme, about,
                   registered_at, last_seen_at
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_one(pool)
        .await
        .map_err(|e| fetch_error(ENTITY, "users.find_by_login", e))
    }

    /// Lists all users; an empty table yields `NotFound` per the collection
    /// contract
    pub async fn list(pool: &PgPool) -> RepoResult<Vec<Self>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, email, password, is_admin, language, theme, about,
                   registered_at, last_seen_at
            FROM users
            ORDER BY registered_at
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| storage("users.list", e))?;

        require_rows(ENTITY, users)
    }

    /// Full profile update
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the new login or email is taken; `NotFound` if the
    /// id does not exist.
    pub async fn update(pool: &PgPool, id: Uuid, data: UpdateUser) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET login = $1, email = $2, password = $3, language = $4, theme = $5, about = $6
            WHERE id = $7
            "#,
        )
        .bind(data.login)
        .bind(data.email)
        .bind(data.password)
        .bind(data.language)
        .bind(data.theme)
        .bind(data.about)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| insert_error(ENTITY, "users.update", e))?;

        require_affected(ENTITY, result)
    }

    /// Refreshes `last_seen_at`; called after successful authentication
    pub async fn update_last_seen(pool: &PgPool, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("UPDATE users SET last_seen_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("users.update_last_seen", e))?;

        require_affected(ENTITY, result)
    }

    /// Deletes a user and, via cascade, everything they own
    pub async fn delete(pool: &PgPool, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| storage("users.delete", e))?;

        require_affected(ENTITY, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            login: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "$argon2id$secret".to_string(),
            is_admin: false,
            language: "en".to_string(),
            theme: "light".to_string(),
            about: String::new(),
            registered_at: Utc::now(),
            last_seen_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["login"], "alice");
    }
}
