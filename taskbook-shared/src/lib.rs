//! # Taskbook Shared Library
//!
//! This crate contains the domain types, persistence layer and business logic
//! used by the Taskbook API server.
//!
//! ## Module Organization
//!
//! - `models`: User and task records plus their PostgreSQL queries
//! - `db`: Connection pool and migrations
//! - `store`: Storage traits with PostgreSQL and in-memory backends
//! - `auth`: Password hashing, tokens, request authentication, ownership checks
//! - `services`: Account registration/login and owner-scoped task operations

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Taskbook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
