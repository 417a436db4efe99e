//! scholar-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), overlays
//! `SCHOLAR_*` environment variables, and serves the paper API over HTTP.
//! Papers are kept in memory and vanish when the process exits.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use scholar_server::ServerConfig;
use scholar_store_memory::MemoryStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "ScholarAssist paper API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SCHOLAR"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = Arc::new(MemoryStore::new());
  let app = scholar_server::router(store, &server_cfg)?;
  let address = server_cfg.address();

  tracing::info!(
    allowed_origin = %server_cfg.allowed_origin,
    "Backend server running at http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
