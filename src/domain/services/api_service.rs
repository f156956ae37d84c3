use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::error::DomainError;

/// Transport to the backend. Every method resolves the response envelope and
/// yields the typed payload.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get<T>(&self, path: &str) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send;

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;

    async fn delete<T>(&self, path: &str) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Send;
}
