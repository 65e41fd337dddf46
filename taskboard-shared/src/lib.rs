//! # Taskboard Shared Library
//!
//! Shared types and logic for the taskboard API server:
//!
//! - `auth`: password hashing, token manager, request authentication
//! - `db`: connection pool and migrations
//! - `error`: repository error taxonomy and translation helpers
//! - `models`: entity repositories
//! - `response`: the JSON response envelope

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod response;

/// Current version of the taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
