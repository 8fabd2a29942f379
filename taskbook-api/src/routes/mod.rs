//! API route handlers
//!
//! - `health`: Liveness banner and health check
//! - `users`: Registration and login
//! - `tasks`: Owner-scoped task CRUD (bearer token required)

pub mod health;
pub mod tasks;
pub mod users;

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that also runs `validator` rules
///
/// Malformed JSON and failed validation both come back as [`ApiError`], so
/// clients always see the same error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;

        Ok(ValidJson(value))
    }
}
