/// Authentication primitives
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: access/refresh token pair issuance and verification
/// - [`middleware`]: bearer-token request authentication for Axum

pub mod jwt;
pub mod middleware;
pub mod password;
