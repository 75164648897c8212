//! API server configuration.

use relay_core::RelayConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Settings for the assistant relay.
    pub relay: RelayConfig,
}
