//! # Taskbook API Server Library
//!
//! HTTP layer of Taskbook: configuration, router, error mapping and route
//! handlers on top of `taskbook-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
