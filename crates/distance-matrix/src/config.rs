use std::env;
use std::time::Duration;

/// Google Distance Matrix JSON endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Upstream calls are abandoned after this many seconds unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process-wide proxy configuration, read once at start-up.
#[derive(Clone)]
pub struct ProxyConfig {
    /// Upstream API key. `None` when unset or empty.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
}

impl ProxyConfig {
    /// Configuration with the given key and default endpoint and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: non_empty(api_key.into()), ..Self::unconfigured() }
    }

    /// Configuration without an API key. Every request fails its precondition.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let api_key = env::var("DISTANCE_API_KEY").ok().and_then(non_empty);
        let endpoint =
            env::var("DISTANCE_MATRIX_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout = Duration::from_secs(env_u64("DISTANCE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));

        Self { api_key, endpoint, timeout }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

// keep the key out of logs
impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key).ok().and_then(|value| value.parse::<u64>().ok()).unwrap_or(default)
}
