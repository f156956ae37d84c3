use serde::{Deserialize, Serialize};

/// What is known about a failed HTTP exchange.
///
/// A status of `0` means the server could not be reached at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportFailure {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl TransportFailure {
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: Some(message.into()),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::with_status(0, message)
    }
}
