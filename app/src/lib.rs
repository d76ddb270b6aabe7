//! Tradeboard application library

use anyhow::Context;
use purchase_flow::ProgressSimulator;
use trade_api::AppState;
use tradeboard_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Default log levels, extended by `RUST_LOG`
const LOG_DIRECTIVES: &[&str] = &[
    "tradeboard=debug",
    "p2p_trade=debug",
    "trade_api=debug",
    "purchase_flow=debug",
    "info",
];

fn env_filter() -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

/// Run the local trade API until it stops
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()?).init();

    tracing::info!("Starting Tradeboard");

    let config = AppConfig::load().context("Failed to load configuration")?;
    if let Err(e) = ProgressSimulator::new(config.progress.clone()).validate() {
        tracing::warn!("Progress display config is unusable: {}", e);
    }

    let state = AppState::with_config(config.board.clone());
    trade_api::start_server(state, config.server_port)
        .await
        .with_context(|| format!("Trade API on port {} stopped", config.server_port))
}
