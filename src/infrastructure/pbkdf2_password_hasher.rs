use async_trait::async_trait;
use pbkdf2::pbkdf2_hmac;
use rand_core::{OsRng, TryRngCore};
use sha2::Sha256;

use crate::domain::{
    error::DomainError, models::password::PasswordHashResult,
    services::password_service::PasswordHasher,
};

/// Tracing target for password hashing.
pub const TRACING_TARGET: &str = "couple_planner::password";

pub const DEFAULT_ITERATIONS: u32 = 100_000;
pub const DEFAULT_SALT_LENGTH: usize = 16;
const KEY_LENGTH: usize = 32;

/// Random salt from the operating system's CSPRNG, hex encoded.
pub fn generate_salt(length: usize) -> Result<String, DomainError> {
    let mut salt = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| DomainError::CryptoOperation(format!("Failed to generate salt: {e}")))?;
    Ok(hex::encode(salt))
}

/// PBKDF2-HMAC-SHA256 of `password`, using the UTF-8 bytes of `salt` as the
/// derivation salt. Returns 64 lowercase hex characters.
pub fn derive_hash(password: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    hex::encode(key)
}

#[derive(Debug, Clone)]
pub struct Pbkdf2PasswordHasher {
    iterations: u32,
    salt_length: usize,
}

impl Pbkdf2PasswordHasher {
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }

    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::new()
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for Pbkdf2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for Pbkdf2PasswordHasher {
    async fn hash(
        &self,
        plain_password: &str,
        salt: Option<&str>,
    ) -> Result<PasswordHashResult, DomainError> {
        let salt = match salt {
            Some(salt) => salt.to_string(),
            None => generate_salt(self.salt_length)?,
        };

        let password = plain_password.to_string();
        let iterations = self.iterations;
        let derivation_salt = salt.clone();

        // the key stretching loop is CPU bound
        let hash = tokio::task::spawn_blocking(move || {
            derive_hash(&password, &derivation_salt, iterations)
        })
        .await
        .map_err(|e| DomainError::CryptoOperation(format!("Hashing task failed: {e}")))?;

        Ok(PasswordHashResult::new(hash, salt))
    }

    async fn verify(&self, plain_password: &str, hash: &str, salt: &str) -> bool {
        match self.hash(plain_password, Some(salt)).await {
            Ok(computed) => computed.hash == hash,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %err,
                    "Password verification failed"
                );
                false
            }
        }
    }
}
