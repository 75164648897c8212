//! # relay_core
//!
//! Core domain logic for Assistant Relay.

pub mod assistant;
pub mod config;
pub mod relay;

pub use assistant::{AssistantApi, AssistantError};
pub use config::RelayConfig;
pub use relay::{AssistantRelay, FALLBACK_RESPONSE, RelayResult, Sleeper, TokioSleeper};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
