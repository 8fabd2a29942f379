//! Business logic on top of the store traits
//!
//! - [`accounts`]: registration and credential checks
//! - [`tasks`]: owner-scoped task operations

pub mod accounts;
pub mod tasks;
