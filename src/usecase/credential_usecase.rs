use crate::domain::{
    error::DomainError,
    models::password::PasswordHashResult,
    services::{password_policy::validate_password_strength, password_service::PasswordHasher},
};

pub struct CredentialUsecase<P: PasswordHasher> {
    password_hasher: P,
}

impl<P: PasswordHasher> CredentialUsecase<P> {
    pub fn new(password_hasher: P) -> Self {
        Self { password_hasher }
    }

    /// Hash a new password after it passes the strength rules. A fresh salt
    /// is generated unless one is given.
    pub async fn prepare(
        &self,
        password: &str,
        salt: Option<&str>,
    ) -> Result<PasswordHashResult, DomainError> {
        let report = validate_password_strength(password);
        if !report.is_valid {
            return Err(DomainError::WeakPassword(report.feedback));
        }

        self.password_hasher.hash(password, salt).await
    }

    pub async fn check(&self, password: &str, stored: &PasswordHashResult) -> bool {
        self.password_hasher
            .verify(password, &stored.hash, &stored.salt)
            .await
    }
}
