//! Resource-level authorization
//!
//! Every task has exactly one owner and only that owner may read, change or
//! delete it. There are no roles or sharing.
//!
//! # Example
//!
//! ```
//! use taskbook_shared::auth::authorization::require_ownership;
//! use taskbook_shared::auth::middleware::AuthUser;
//! use uuid::Uuid;
//!
//! # fn example(user: AuthUser, task_owner_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
//! require_ownership(&user, task_owner_id)?;
//! # Ok(())
//! # }
//! ```

use uuid::Uuid;

use super::middleware::AuthUser;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Requester does not own the resource
    #[error("Not authorized to access this resource")]
    NotOwner,
}

/// Checks that `requester` owns a resource owned by `resource_owner_id`
pub fn require_ownership(requester: &AuthUser, resource_owner_id: Uuid) -> Result<(), AuthzError> {
    if requester.id != resource_owner_id {
        return Err(AuthzError::NotOwner);
    }

    Ok(())
}
