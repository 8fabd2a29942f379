//! Database layer
//!
//! - `pool`: PostgreSQL connection pool with a startup health check
//! - `migrations`: Embedded sqlx migrations
//!
//! Row types and their queries are in [`crate::models`].

pub mod migrations;
pub mod pool;
