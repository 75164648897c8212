//! Assistant Relay server binary.
//!
//! Serves `POST /api/chat` and relays each message to the hosted assistant.

use std::time::Duration;

use clap::Parser;
use relay_api::config::ApiConfig;
use relay_core::RelayConfig;
use relay_core::config::{
    DEFAULT_BASE_URL, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "relay_server", about = "Assistant Relay HTTP server")]
struct Args {
    /// Host to bind.
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// API key for the hosted assistant service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Assistant every run is started against.
    #[arg(long, env = "OPENAI_ASSISTANT_ID")]
    assistant_id: Option<String>,

    /// Base URL of the assistant API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Delay before each run status check, in milliseconds.
    #[arg(long, env = "RELAY_POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,

    /// Number of run status checks before giving up.
    #[arg(long, env = "RELAY_MAX_POLL_ATTEMPTS", default_value_t = DEFAULT_MAX_POLL_ATTEMPTS)]
    max_poll_attempts: u32,

    /// Timeout for each outbound HTTP call, in seconds.
    #[arg(
        long,
        env = "RELAY_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> ApiConfig {
        ApiConfig {
            bind_addr: format!("{}:{}", self.host, self.port),
            relay: RelayConfig {
                api_key: self.api_key,
                assistant_id: self.assistant_id,
                base_url: self.base_url,
                poll_interval: Duration::from_millis(self.poll_interval_ms),
                max_poll_attempts: self.max_poll_attempts,
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay_api=debug,relay_core=debug".into()),
        )
        .init();

    let config = Args::parse().into_config();

    info!(
        bind_addr = %config.bind_addr,
        base_url = %config.relay.base_url,
        max_poll_attempts = config.relay.max_poll_attempts,
        "starting relay_server"
    );
    if !config.relay.is_configured() {
        // Requests are still served; each one answers with the fallback text.
        warn!("OPENAI_API_KEY or OPENAI_ASSISTANT_ID is not set");
    }

    let state = relay_api::AppState::from_config(&config.relay)?;
    let app = relay_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("relay_server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn declared_default(id: &str) -> String {
        let command = Args::command();
        let arg = command
            .get_arguments()
            .find(|a| a.get_id() == id)
            .unwrap_or_else(|| panic!("no argument {id}"));
        arg.get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn declared_defaults_follow_relay_constants() {
        let defaults = RelayConfig::default();
        assert_eq!(
            declared_default("poll_interval_ms"),
            defaults.poll_interval.as_millis().to_string()
        );
        assert_eq!(
            declared_default("request_timeout_secs"),
            defaults.request_timeout.as_secs().to_string()
        );
        assert_eq!(
            declared_default("max_poll_attempts"),
            defaults.max_poll_attempts.to_string()
        );
        assert_eq!(declared_default("base_url"), defaults.base_url);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Args::parse_from([
            "relay_server",
            "--port",
            "8080",
            "--api-key",
            "sk-test",
            "--assistant-id",
            "asst_1",
            "--poll-interval-ms",
            "250",
            "--max-poll-attempts",
            "5",
            "--request-timeout-secs",
            "10",
        ])
        .into_config();
        assert!(config.bind_addr.ends_with(":8080"), "{}", config.bind_addr);
        assert!(config.relay.is_configured());
        assert_eq!(config.relay.poll_interval, Duration::from_millis(250));
        assert_eq!(config.relay.max_poll_attempts, 5);
        assert_eq!(config.relay.request_timeout, Duration::from_secs(10));
    }
}
