//! Account endpoints
//!
//! - `POST /api/users/register` - Create an account and get a token
//! - `POST /api/users/login` - Exchange credentials for a token
//!
//! Both answer with the same body:
//!
//! ```json
//! {
//!   "id": "uuid",
//!   "name": "Ann",
//!   "email": "ann@x.com",
//!   "token": "eyJ..."
//! }
//! ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskbook_shared::models::user::User;
use uuid::Uuid;
use validator::Validate;

use super::ValidJson;

/// Register request
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login request
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Identity plus a freshly issued bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    fn issue(state: &AppState, user: User) -> ApiResult<Self> {
        let token = state.tokens.issue(user.id)?;

        Ok(Self {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }
}

/// Register a new user
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or email already registered
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> ApiResult<(StatusCode, axum::Json<AuthResponse>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "name".to_string(),
            message: "Name is required".to_string(),
        }]));
    }

    let user = state.accounts.register(name, &req.email, &req.password).await?;

    Ok((StatusCode::CREATED, axum::Json(AuthResponse::issue(&state, user)?)))
}

/// Log in with email and password
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password (same message for both)
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<axum::Json<AuthResponse>> {
    let user = state.accounts.verify_password(&req.email, &req.password).await?;

    tracing::debug!(user_id = %user.id, "User logged in");
    Ok(axum::Json(AuthResponse::issue(&state, user)?))
}
