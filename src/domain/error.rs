use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Respuesta del servidor con formato inválido")]
    MalformedResponse,

    #[error("{0}")]
    BackendLogic(String),

    #[error("{0}")]
    Transport(String),

    #[error("Crypto operation failed: {0}")]
    CryptoOperation(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Weak password: {}", .0.join("; "))]
    WeakPassword(Vec<String>),
}
