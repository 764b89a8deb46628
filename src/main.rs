//! GOLDDESK — gold trade assistant
//!
//! Entry point. Loads configuration, initialises structured logging, builds
//! the GoldAPI client and serves the desk page until Ctrl+C.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use golddesk::config;
use golddesk::dashboard::{self, DeskState};
use golddesk::price::goldapi::GoldApiClient;

const BANNER: &str = r#"
  ____  ___  _     ____  ____  _____ ____  _  __
 / ___|/ _ \| |   |  _ \|  _ \| ____/ ___|| |/ /
| |  _| | | | |   | | | | | | |  _| \___ \| ' /
| |_| | |_| | |___| |_| | |_| | |___ ___) | . \
 \____|\___/|_____|____/|____/|_____|____/|_|\_\

  Live XAU/USD quote · RR · Premium/Discount zones
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = config::AppConfig::load_or_default("config.toml")?;
    cfg.validate()?;

    init_logging();

    println!("{BANNER}");
    info!(
        desk = %cfg.desk.name,
        endpoint = %cfg.price_api.endpoint,
        max_sessions = cfg.desk.max_sessions,
        "GOLDDESK starting up"
    );

    let prices = GoldApiClient::from_config(&cfg.price_api)?;
    let state = Arc::new(DeskState::new(Arc::new(prices), cfg.desk.max_sessions));

    let addr: SocketAddr = format!("{}:{}", cfg.desk.host, cfg.desk.port)
        .parse()
        .with_context(|| format!("Invalid desk address {}:{}", cfg.desk.host, cfg.desk.port))?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tokio::select! {
        result = dashboard::serve(state, addr) => result?,
        _ = &mut shutdown => {
            info!("Shutdown signal received.");
        }
    }

    info!("GOLDDESK shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("golddesk=info"));

    if std::env::var("GOLDDESK_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
