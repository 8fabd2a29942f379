//! Authentication and authorization
//!
//! - [`password`]: Argon2id password hashing behind [`password::PasswordHashing`]
//! - [`jwt`]: HS256 bearer tokens behind [`jwt::TokenSigner`]
//! - [`middleware`]: Axum layer resolving bearer tokens to an [`middleware::AuthUser`]
//! - [`authorization`]: per-task ownership checks

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
