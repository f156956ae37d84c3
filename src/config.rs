//! Configuration for the backend API client.

use std::time::Duration;

use crate::domain::error::DomainError;

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_VAR: &str = "COUPLE_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "COUPLE_API_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "COUPLE_API_USER_AGENT";
pub const TOKEN_VAR: &str = "COUPLE_API_TOKEN";

/// Tracing target for configuration loading.
pub const TRACING_TARGET: &str = "couple_planner::config";

#[derive(Clone)]
pub struct ClientConfig {
    /// Root of the REST API, e.g. `https://api.example.com/api`.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// User-Agent header to send with requests.
    pub user_agent: String,
    /// Bearer token attached to every request when set.
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Self::default_user_agent(),
            auth_token: None,
        }
    }

    /// Load from the process environment, reading a `.env` file first when
    /// one exists.
    pub fn from_env() -> Result<Self, DomainError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(target: TRACING_TARGET, error = %err, "Failed to load .env file");
        }
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let base_url = lookup(BASE_URL_VAR)
            .ok_or_else(|| DomainError::Configuration(format!("{BASE_URL_VAR} is not set")))?;

        let mut config = Self::new(base_url);

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                DomainError::Configuration(format!("{TIMEOUT_VAR} must be a number of seconds"))
            })?;
            config = config.with_timeout(Duration::from_secs(seconds));
        }
        if let Some(user_agent) = lookup(USER_AGENT_VAR) {
            config = config.with_user_agent(user_agent);
        }
        if let Some(token) = lookup(TOKEN_VAR).filter(|token| !token.is_empty()) {
            config = config.with_auth_token(token);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis(),
            authenticated = config.auth_token.is_some(),
            "Loaded client configuration"
        );

        config.validate()?;
        Ok(config)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("couple-planner/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// Returns the effective user agent, using default if empty.
    pub fn effective_user_agent(&self) -> String {
        if self.user_agent.is_empty() {
            Self::default_user_agent()
        } else {
            self.user_agent.clone()
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(DomainError::Configuration("base URL is empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DomainError::Configuration(format!(
                "base URL must start with http:// or https://, got {base_url}"
            )));
        }
        if self.timeout.is_zero() {
            return Err(DomainError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Join a resource path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
