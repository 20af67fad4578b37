//! Authentication collaborators
//!
//! Hashing and token signing live outside this crate; the business layer only
//! depends on these traits.

use chrono::{DateTime, Utc};

use crate::errors::AppResult;

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> AppResult<String>;

    /// Whether `plain` matches the stored `hashed` value
    fn verify(&self, hashed: &str, plain: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedToken {
    pub token: String,
    pub expire_at: DateTime<Utc>,
}

pub trait TokenSigner: Send + Sync {
    /// Issue a token for the external user id `identity`
    fn sign(&self, identity: &str) -> Result<SignedToken, String>;
}
