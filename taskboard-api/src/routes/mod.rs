/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: sign-up, sign-in, refresh rotation, logout
/// - `users`: profile management and the admin user list
/// - `private`: the caller's own board/category/task hierarchy
/// - `projects`: shared projects, membership, and their hierarchy

pub mod auth;
pub mod health;
pub mod private;
pub mod projects;
pub mod users;
