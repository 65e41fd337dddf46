/// Repository error taxonomy and translation helpers
///
/// Every entity repository in `models/` follows the same contract:
///
/// - **Create**: a unique-constraint violation becomes [`RepoError::AlreadyExists`];
///   any other database failure becomes [`RepoError::Storage`].
/// - **Read (single)**: zero matching rows becomes [`RepoError::NotFound`].
/// - **Read (collection)**: an *empty* result set also becomes `NotFound`.
///   Callers distinguish "nothing exists yet" from a populated result only via
///   the error. This conflates two outcomes but is the established wire
///   contract; see `require_rows`.
/// - **Update / Delete**: zero affected rows becomes `NotFound`; an update
///   that trips a uniqueness constraint becomes `AlreadyExists`, same as an
///   insert.
///
/// The translation lives here exactly once; repositories call these helpers
/// instead of matching on `sqlx::Error` themselves.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::error::{insert_error, RepoResult};
/// use sqlx::PgPool;
///
/// async fn create_thing(pool: &PgPool, name: &str) -> RepoResult<()> {
///     sqlx::query("INSERT INTO things (name) VALUES ($1)")
///         .bind(name)
///         .execute(pool)
///         .await
///         .map_err(|e| insert_error("thing", "things.create", e))?;
///     Ok(())
/// }
/// ```

use sqlx::postgres::PgQueryResult;

/// Result alias used by all repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Typed repository outcomes
///
/// `entity` names what was being operated on ("user", "private board", ...);
/// `op` carries the operation context for diagnostics ("users.create", ...).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Insert hit a uniqueness constraint
    #[error("{entity} already exists")]
    AlreadyExists { entity: &'static str },

    /// No matching row for a keyed read/update/delete, or an empty
    /// collection result
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Any other storage-layer failure, wrapped with operation context.
    /// A statement aborted by request cancellation surfaces here too.
    #[error("storage failure during {op}")]
    Storage {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl RepoError {
    /// True for the two domain variants the handler layer maps to 4xx codes
    pub fn is_domain(&self) -> bool {
        !matches!(self, RepoError::Storage { .. })
    }
}

/// Translates a write failure: unique violation → `AlreadyExists`,
/// everything else → `Storage`. Used for inserts and for updates that can
/// trip a uniqueness constraint.
pub fn insert_error(entity: &'static str, op: &'static str, err: sqlx::Error) -> RepoError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return RepoError::AlreadyExists { entity };
        }
    }

    RepoError::Storage { op, source: err }
}

/// Translates a single-row fetch failure: `RowNotFound` → `NotFound`,
/// everything else → `Storage`
pub fn fetch_error(entity: &'static str, op: &'static str, err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound { entity },
        err => RepoError::Storage { op, source: err },
    }
}

/// Wraps a storage failure with operation context
pub fn storage(op: &'static str, err: sqlx::Error) -> RepoError {
    RepoError::Storage { op, source: err }
}

/// Zero affected rows on update/delete means the key did not exist
pub fn require_affected(entity: &'static str, result: PgQueryResult) -> RepoResult<()> {
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound { entity });
    }

    Ok(())
}

/// Empty collection reads fail with `NotFound` rather than returning an
/// empty vector. Preserved from the original wire contract even though it
/// conflates "empty" with "missing".
pub fn require_rows<T>(entity: &'static str, rows: Vec<T>) -> RepoResult<Vec<T>> {
    if rows.is_empty() {
        return Err(RepoError::NotFound { entity });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    /// Minimal `DatabaseError` double; real drivers are not constructible
    /// off-line, and only the error kind matters here.
    #[derive(Debug)]
    struct FakeDbError {
        unique: bool,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "constraint violation")
        }
    }

    impl StdError for FakeDbError {}

    impl sqlx::error::DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            if self.unique {
                Some(Cow::Borrowed("23505"))
            } else {
                None
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            if self.unique {
                sqlx::error::ErrorKind::UniqueViolation
            } else {
                sqlx::error::ErrorKind::Other
            }
        }
    }

    fn unique_violation() -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { unique: true }))
    }

    #[test]
    fn test_insert_error_maps_unique_violation() {
        let err = insert_error("user", "users.create", unique_violation());
        assert!(matches!(err, RepoError::AlreadyExists { entity: "user" }));
    }

    #[test]
    fn test_insert_error_wraps_other_database_errors() {
        let err = insert_error(
            "user",
            "users.create",
            sqlx::Error::Database(Box::new(FakeDbError { unique: false })),
        );
        assert!(matches!(err, RepoError::Storage { op: "users.create", .. }));
    }

    #[test]
    fn test_require_affected_zero_rows_is_not_found() {
        let err = require_affected("user", PgQueryResult::default()).unwrap_err();
        assert!(matches!(err, RepoError::NotFound { entity: "user" }));
    }

    #[test]
    fn test_fetch_error_maps_row_not_found() {
        let err = fetch_error("user", "users.find_by_id", sqlx::Error::RowNotFound);
        assert!(matches!(err, RepoError::NotFound { entity: "user" }));
    }

    #[test]
    fn test_fetch_error_wraps_other_errors() {
        let err = fetch_error("user", "users.find_by_id", sqlx::Error::PoolClosed);
        assert!(matches!(
            err,
            RepoError::Storage {
                op: "users.find_by_id",
                ..
            }
        ));
    }

    #[test]
    fn test_insert_error_wraps_non_unique_errors() {
        let err = insert_error("user", "users.create", sqlx::Error::PoolClosed);
        assert!(matches!(err, RepoError::Storage { .. }));
    }

    #[test]
    fn test_require_rows_empty_is_not_found() {
        let rows: Vec<i32> = Vec::new();
        let err = require_rows("private board", rows).unwrap_err();
        assert!(matches!(
            err,
            RepoError::NotFound {
                entity: "private board"
            }
        ));
    }

    #[test]
    fn test_require_rows_passes_through_non_empty() {
        let rows = require_rows("private board", vec![1, 2, 3]).unwrap();
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_is_domain() {
        assert!(RepoError::AlreadyExists { entity: "user" }.is_domain());
        assert!(RepoError::NotFound { entity: "user" }.is_domain());
        assert!(!RepoError::Storage {
            op: "users.create",
            source: sqlx::Error::PoolClosed,
        }
        .is_domain());
    }

    #[test]
    fn test_error_messages() {
        let err = RepoError::AlreadyExists { entity: "user" };
        assert_eq!(err.to_string(), "user already exists");

        let err = RepoError::NotFound { entity: "refresh session" };
        assert_eq!(err.to_string(), "refresh session not found");
    }
}
