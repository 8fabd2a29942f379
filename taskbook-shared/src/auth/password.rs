//! Password hashing using Argon2id
//!
//! Hashing sits behind the [`PasswordHashing`] trait so the algorithm can be
//! swapped without touching the account service.
//!
//! # Security
//!
//! - **Algorithm**: Argon2id, version 0x13
//! - **Salt**: 16 random bytes per hash from the OS RNG
//! - **Cost**: configurable via [`HashingConfig`]; defaults to 64 MB memory,
//!   3 passes, 4 lanes
//! - **Format**: PHC string, so verification reads the parameters back from
//!   the stored hash and old hashes keep verifying after a cost change
//!
//! # Example
//!
//! ```
//! use taskbook_shared::auth::password::{Argon2Hasher, HashingConfig, PasswordHashing};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hasher = Argon2Hasher::new(HashingConfig::default())?;
//! let hash = hasher.hash("super_secret_password_123")?;
//!
//! assert!(hasher.verify("super_secret_password_123", &hash)?);
//! assert!(!hasher.verify("wrong_password", &hash)?);
//! # Ok(())
//! # }
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, ParamsBuilder, Version,
};
use serde::{Deserialize, Serialize};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Cost parameters rejected by argon2
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Narrow hashing interface used by the account service
pub trait PasswordHashing: Send + Sync {
    /// Hashes a plaintext password into a self-describing digest
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Checks a plaintext password against a digest
    ///
    /// `Ok(false)` means the password is wrong; `Err` means the digest itself
    /// could not be processed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id implementation of [`PasswordHashing`]
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Builds a hasher, validating the cost parameters up front
    pub fn new(config: HashingConfig) -> Result<Self, PasswordError> {
        let params = ParamsBuilder::new()
            .m_cost(config.memory_kib)
            .t_cost(config.iterations)
            .p_cost(config.parallelism)
            .output_len(32)
            .build()
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHashing for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;

        Ok(password_hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        // Parameters come from the PHC string; comparison is constant-time
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerifyError(e.to_string())),
        }
    }
}
