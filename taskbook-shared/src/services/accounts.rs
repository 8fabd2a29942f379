//! Account registration and login
//!
//! Passwords are hashed on the blocking thread pool so a memory-hard hash does
//! not stall the async workers.

use std::sync::Arc;

use crate::auth::password::{PasswordError, PasswordHashing};
use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, UserStore};

/// Error type for account operations
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password; callers cannot tell which
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AccountError::DuplicateEmail,
            StoreError::Database(msg) => AccountError::Store(msg),
        }
    }
}

/// Credential store operations
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHashing>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self { users, hasher }
    }

    /// Registers a new user
    ///
    /// The early lookup only saves a wasted hash; the store's uniqueness check
    /// is what keeps two racing registrations from both succeeding.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        if self.users.find_user_by_email(email).await?.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        let password_hash = self.hash(password).await?;

        let user = self
            .users
            .insert_user(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Checks an email/password pair, returning the user on success
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let user = match self.users.find_user_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::VerifyError(e.to_string()))??;

        if !valid {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashError(e.to_string()))?
    }
}
