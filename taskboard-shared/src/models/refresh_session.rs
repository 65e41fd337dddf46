/// Refresh session model and database operations
///
/// One row per active refresh grant. The opaque token value is the primary
/// key; a user may hold several concurrent sessions, one per device, each
/// bound to a client fingerprint. Rotation is delete-then-create, performed
/// by the refresh handler; expiry is checked at use-time, never swept.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE refresh_sessions (
///     token VARCHAR(128) PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     expires_in TIMESTAMPTZ NOT NULL,
///     fingerprint VARCHAR(255) NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{fetch_error, insert_error, require_affected, storage, RepoResult};

const ENTITY: &str = "refresh session";

/// One active refresh grant
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshSession {
    /// Opaque refresh token value; unique, acts as the key
    pub token: String,

    pub user_id: Uuid,

    /// Past this instant the session is invalid (checked at use-time)
    pub expires_in: DateTime<Utc>,

    /// Device/browser binding supplied by the client at sign-in
    pub fingerprint: String,
}

impl RefreshSession {
    /// True once the grant's expiry has passed
    pub fn is_expired(&self) -> bool {
        self.expires_in <= Utc::now()
    }

    /// Persists a new refresh grant
    ///
    /// # Errors
    ///
    /// `AlreadyExists` on a token collision (practically impossible for
    /// 256-bit random values); `Storage` otherwise.
    pub async fn create(pool: &PgPool, session: RefreshSession) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (token, user_id, expires_in, fingerprint)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.token)
        .bind(session.user_id)
        .bind(session.expires_in)
        .bind(session.fingerprint)
        .execute(pool)
        .await
        .map_err(|e| insert_error(ENTITY, "refresh_sessions.create", e))?;

        Ok(())
    }

    /// Looks up a session by token value; `NotFound` for unknown (or
    /// already rotated) tokens
    pub async fn find_by_token(pool: &PgPool, token: &str) -> RepoResult<Self> {
        sqlx::query_as::<_, RefreshSession>(
            r#"
            SELECT token, user_id, expires_in, fingerprint
            FROM refresh_sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_one(pool)
        .await
        .map_err(|e| fetch_error(ENTITY, "refresh_sessions.find_by_token", e))
    }

    /// Revokes a grant; `NotFound` if the token was never issued or has
    /// already been rotated away
    pub async fn delete(pool: &PgPool, token: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await
            .map_err(|e| storage("refresh_sessions.delete", e))?;

        require_affected(ENTITY, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_expired() {
        let mut session = RefreshSession {
            token: "abc".to_string(),
            user_id: Uuid::new_v4(),
            expires_in: Utc::now() + Duration::days(30),
            fingerprint: "firefox-linux".to_string(),
        };
        assert!(!session.is_expired());

        session.expires_in = Utc::now() - Duration::seconds(1);
        assert!(session.is_expired());
    }
}
