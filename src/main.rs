//! Event-stream runner (default binary).
//!
//! Reads line-delimited JSON commands from stdin and writes engine events to
//! stdout. Logs go to stderr; set `RUST_LOG` to change the filter.

use anyhow::Result;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use tile_cascade::adapter::run_session;
use tile_cascade::engine::EngineConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env();
    config.validate()?;
    tracing::info!(?config, "starting tile-cascade");

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let stats = run_session(config, stdin, stdout).await?;

    tracing::info!(
        removals = stats.removals,
        tiles_matched = stats.tiles_matched,
        cascades = stats.cascades,
        "done"
    );
    Ok(())
}
