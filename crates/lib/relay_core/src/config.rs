//! Relay configuration.

use std::time::Duration;

/// Default base URL of the hosted assistant API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default delay between run status checks, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
/// Default delay between run status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
/// Default number of run status checks before giving up.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;
/// Default timeout applied to each outbound HTTP call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default timeout applied to each outbound HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);

/// Configuration for the assistant relay.
///
/// Credentials are optional here: a relay can be constructed without them and
/// only reports the problem when a message is actually relayed.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Bearer credential for the remote assistant API.
    pub api_key: Option<String>,
    /// Identifier of the assistant every run is started against.
    pub assistant_id: Option<String>,
    /// Base URL of the remote API, without a trailing slash.
    pub base_url: String,
    /// Delay before each run status check.
    pub poll_interval: Duration,
    /// Maximum number of run status checks.
    pub max_poll_attempts: u32,
    /// Timeout for each outbound HTTP call.
    pub request_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RelayConfig {
    /// The API key, if set to something other than whitespace.
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// The assistant identifier, if set to something other than whitespace.
    pub fn assistant_id(&self) -> Option<&str> {
        non_blank(self.assistant_id.as_deref())
    }

    /// Whether both required credentials are present.
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some() && self.assistant_id().is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
