/// Database models and their SQL operations
///
/// One repository per entity, all speaking the error-translation contract
/// from [`crate::error`]:
///
/// - `user`: accounts and profile preferences
/// - `refresh_session`: revocable refresh grants
/// - `project`: shared projects and their memberships
/// - `private`: per-user board/category/task hierarchy
/// - `project_items`: per-project board/category/task hierarchy

pub mod private;
pub mod project;
pub mod project_items;
pub mod refresh_session;
pub mod user;
