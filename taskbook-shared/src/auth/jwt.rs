//! Bearer token issuing and verification
//!
//! Tokens are HS256-signed JWTs binding a user ID and an expiry. Signing sits
//! behind [`TokenSigner`]; [`TokenIssuer`] adds the process-wide TTL on top.
//!
//! One TTL applies to every token, whether it was issued at registration or
//! at login.
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use taskbook_shared::auth::jwt::TokenIssuer;
//! use uuid::Uuid;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let issuer = TokenIssuer::hs256("your-secret-key-at-least-32-bytes-long", Duration::hours(24));
//! let user_id = Uuid::new_v4();
//!
//! let token = issuer.issue(user_id)?;
//! assert_eq!(issuer.verify(&token)?.sub, user_id);
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Value of the `iss` claim on every token
pub const ISSUER: &str = "taskbook";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Malformed, badly signed, wrong issuer or not yet valid
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Past its `exp`
    #[error("Token has expired")]
    Expired,
}

/// JWT claims
///
/// - `sub`: user ID
/// - `iss`: always [`ISSUER`]
/// - `iat` / `nbf` / `exp`: Unix timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
}

impl Claims {
    /// Claims for `user_id` valid from now for `expires_in`
    pub fn new(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            nbf: now.timestamp(),
        }
    }
}

/// Narrow signing interface
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &Claims) -> Result<String, JwtError>;

    /// Checks signature, issuer, `nbf` and `exp`, returning the claims
    fn verify(&self, token: &str) -> Result<Claims, JwtError>;
}

/// HMAC-SHA256 signer
///
/// The secret should be at least 32 bytes of random data.
pub struct Hs256Signer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256Signer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl fmt::Debug for Hs256Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hs256Signer").finish_non_exhaustive()
    }
}

impl TokenSigner for Hs256Signer {
    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| JwtError::CreateError(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Issues and verifies bearer tokens with a fixed TTL
///
/// Built once at startup from configuration and cloned into request
/// handlers.
#[derive(Clone)]
pub struct TokenIssuer {
    signer: Arc<dyn TokenSigner>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(signer: Arc<dyn TokenSigner>, ttl: Duration) -> Self {
        Self { signer, ttl }
    }

    /// Shorthand for an issuer backed by [`Hs256Signer`]
    pub fn hs256(secret: &str, ttl: Duration) -> Self {
        Self::new(Arc::new(Hs256Signer::new(secret.as_bytes())), ttl)
    }

    /// Issues a token for `user_id`
    pub fn issue(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.signer.sign(&Claims::new(user_id, self.ttl))
    }

    /// Verifies a token, distinguishing [`JwtError::Expired`] from
    /// [`JwtError::Invalid`]
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.signer.verify(token)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, Duration::hours(1));

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::hs256(SECRET, Duration::hours(24));
        let user_id = Uuid::new_v4();

        let token = issuer.issue(user_id).expect("Should issue token");
        let claims = issuer.verify(&token).expect("Should verify token");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, Duration::hours(24).num_seconds());
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = TokenIssuer::hs256(SECRET, Duration::hours(1))
            .issue(Uuid::new_v4())
            .unwrap();

        let result = TokenIssuer::hs256("another-secret-key-at-least-32-bytes", Duration::hours(1))
            .verify(&token);
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_distinct() {
        let issuer = TokenIssuer::hs256(SECRET, Duration::seconds(-3600));
        let token = issuer.issue(Uuid::new_v4()).unwrap();

        assert!(matches!(issuer.verify(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_malformed_token() {
        let issuer = TokenIssuer::hs256(SECRET, Duration::hours(1));

        assert!(matches!(issuer.verify("not-a-jwt"), Err(JwtError::Invalid(_))));
        assert!(matches!(issuer.verify(""), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = TokenIssuer::hs256(SECRET, Duration::hours(1));
        let token = issuer.issue(Uuid::new_v4()).unwrap();

        // Swap the payload for one naming a different user
        let other = issuer.issue(Uuid::new_v4()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(issuer.verify(&forged), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let signer = Hs256Signer::new(SECRET.as_bytes());
        let mut claims = Claims::new(Uuid::new_v4(), Duration::hours(1));
        claims.iss = "someone-else".to_string();
        let token = signer.sign(&claims).unwrap();

        assert!(matches!(signer.verify(&token), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_debug_hides_keys() {
        let issuer = TokenIssuer::hs256(SECRET, Duration::hours(1));
        assert!(!format!("{:?}", issuer).contains(SECRET));
    }
}
