//! Engine binary for the Caravan trading simulation.
//!
//! Loads configuration from `caravan-config.yaml`, assembles the
//! simulation state, and runs the background tick loop that drives the
//! event rotation. The loop never exits on its own; persistence failures
//! during a tick are logged and the next tick proceeds.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use caravan_engine::config::ConfigError;
use caravan_engine::{EngineConfig, SimState};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the Caravan engine.
///
/// # Errors
///
/// Returns an error if configuration loading or state assembly fails;
/// once the tick loop is entered, the process keeps running.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, from_file) = load_config()?;

    // RUST_LOG wins; the config level is the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("caravan-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        event_period_ms = config.market.event_period_ms,
        tick_interval_ms = config.market.tick_interval_ms,
        data_dir = %config.storage.data_dir.display(),
        "Configuration loaded"
    );

    let state = Arc::new(SimState::new(&config, Utc::now()).await?);
    info!(
        cities = state.catalog().city_count(),
        goods = state.catalog().good_count(),
        "Entering tick loop"
    );

    // A zero interval would panic inside tokio; clamp to 1 ms.
    let tick_every = Duration::from_millis(config.market.tick_interval_ms.max(1));
    let mut interval = tokio::time::interval(tick_every);
    loop {
        interval.tick().await;
        match state.tick(Utc::now()).await {
            Ok(Some(news)) => {
                info!(news_id = news.id, text = %news.text, "Market rotation published");
            }
            Ok(None) => {}
            Err(error) => {
                tracing::error!(kind = %error.kind(), error = %error, "Tick failed, continuing");
            }
        }
    }
}

/// Load the engine configuration from `caravan-config.yaml`.
///
/// Returns the configuration and whether it came from the file (as
/// opposed to built-in defaults).
fn load_config() -> Result<(EngineConfig, bool), ConfigError> {
    let config_path = Path::new("caravan-config.yaml");
    if config_path.exists() {
        Ok((EngineConfig::from_file(config_path)?, true))
    } else {
        Ok((EngineConfig::default(), false))
    }
}
