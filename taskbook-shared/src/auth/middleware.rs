//! Bearer authentication middleware for Axum
//!
//! [`require_auth`] reads `Authorization: Bearer <token>`, verifies the token,
//! resolves its subject to a live user and inserts an [`AuthUser`] into the
//! request extensions. Anything short of that ends the request with a 401
//! before the handler runs.
//!
//! Every request is verified again from scratch. Nothing is cached.
//!
//! # Example
//!
//! ```no_run
//! use axum::{middleware, routing::get, Extension, Router};
//! use chrono::Duration;
//! use std::sync::Arc;
//! use taskbook_shared::auth::jwt::TokenIssuer;
//! use taskbook_shared::auth::middleware::{require_auth, AuthUser, Authenticator};
//! use taskbook_shared::store::MemoryStore;
//!
//! async fn whoami(Extension(user): Extension<AuthUser>) -> String {
//!     format!("Hello, {}!", user.name)
//! }
//!
//! let tokens = TokenIssuer::hs256("your-secret-key-at-least-32-bytes-long", Duration::hours(24));
//! let auth = Authenticator::new(tokens, Arc::new(MemoryStore::new()));
//!
//! let app: Router = Router::new()
//!     .route("/me", get(whoami))
//!     .route_layer(middleware::from_fn_with_state(auth, require_auth));
//! ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::jwt::{JwtError, TokenIssuer};
use crate::models::user::User;
use crate::store::UserStore;

/// Identity of the authenticated requester
///
/// Added to request extensions by [`require_auth`]; handlers read it with
/// `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Error type for authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Header present but not a Bearer credential
    #[error("Expected Bearer token")]
    InvalidFormat,

    /// Token failed verification
    #[error("Invalid token")]
    InvalidToken,

    /// Token verified but is past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Token subject no longer exists
    #[error("User no longer exists")]
    UnknownUser,

    /// Store failure while resolving the user
    #[error("Store error: {0}")]
    Store(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AuthError::Store(msg) => {
                tracing::error!("Failed to resolve authenticated user: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            other => (StatusCode::UNAUTHORIZED, "unauthorized", other.to_string()),
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

/// Resolves bearer tokens to users
///
/// Cheap to clone; used as the state of the [`require_auth`] layer.
#[derive(Clone)]
pub struct Authenticator {
    tokens: TokenIssuer,
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(tokens: TokenIssuer, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Extracts the token from an `Authorization: Bearer <token>` header
    pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingCredentials)?
            .to_str()
            .map_err(|_| AuthError::InvalidFormat)?;

        // Scheme names are case-insensitive
        let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidFormat)?;
        if !scheme.eq_ignore_ascii_case("Bearer") {
            return Err(AuthError::InvalidFormat);
        }
        let token = token.trim();

        if token.is_empty() {
            return Err(AuthError::InvalidFormat);
        }

        Ok(token)
    }

    /// Verifies a token and loads the user it names
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            AuthError::from(e)
        })?;

        let user = self
            .users
            .find_user_by_id(claims.sub)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .ok_or_else(|| {
                tracing::debug!(user_id = %claims.sub, "Token subject not found");
                AuthError::UnknownUser
            })?;

        Ok(user.into())
    }
}

/// Bearer authentication layer
///
/// Use with `axum::middleware::from_fn_with_state(authenticator, require_auth)`.
pub async fn require_auth(
    State(auth): State<Authenticator>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = Authenticator::bearer_token(req.headers())?;
    let user = auth.authenticate(token).await?;

    tracing::debug!(user_id = %user.id, "Authenticated request");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
