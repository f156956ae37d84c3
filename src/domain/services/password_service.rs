use async_trait::async_trait;

use crate::domain::{error::DomainError, models::password::PasswordHashResult};

/// Service for hashing and verifying passwords
#[async_trait]
pub trait PasswordHasher: Clone + Send + Sync {
    /// Hash a plain text password, generating a salt when none is given
    async fn hash(
        &self,
        plain_password: &str,
        salt: Option<&str>,
    ) -> Result<PasswordHashResult, DomainError>;

    /// Verify a plain text password against a stored hash and salt.
    /// Internal failures count as a mismatch.
    async fn verify(&self, plain_password: &str, hash: &str, salt: &str) -> bool;
}
