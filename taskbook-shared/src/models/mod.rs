//! Database models for Taskbook
//!
//! # Models
//!
//! - `user`: Registered accounts and their password hashes
//! - `task`: Personal tasks, each owned by exactly one user
//!
//! Each model carries its own PostgreSQL queries. The storage traits in
//! [`crate::store`] sit on top of these so handlers never touch SQL directly.

pub mod task;
pub mod user;
