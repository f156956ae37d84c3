use serde::{Deserialize, Serialize};

/// Wrapper the backend puts around every response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub message: String,
    // present but nullable; a missing key is a malformed envelope
    #[serde(deserialize_with = "Option::deserialize")]
    pub error_message: Option<String>,
    pub payload: T,
}

impl<T> ResponseEnvelope<T> {
    /// Build a successful envelope around `payload`
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_message: None,
            payload,
        }
    }

    /// Build a failed envelope; `payload` is carried but meaningless
    pub fn failure(error_message: impl Into<String>, payload: T) -> Self {
        Self {
            success: false,
            message: String::new(),
            error_message: Some(error_message.into()),
            payload,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The message that applies to the outcome of the call.
    ///
    /// Failed envelopes report `errorMessage`, falling back to `message` when
    /// the backend left it empty.
    pub fn message(&self) -> &str {
        if self.success {
            return &self.message;
        }
        match self.error_message.as_deref() {
            Some(error) if !error.is_empty() => error,
            _ => &self.message,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success.then_some(self.message.as_str())
    }

    pub fn error_message(&self) -> Option<&str> {
        if self.success {
            return None;
        }
        self.error_message.as_deref().filter(|error| !error.is_empty())
    }
}
