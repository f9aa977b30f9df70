//! `kindred` binary.
//!
//! Reads `kindred.toml` (or the path given with `--config`), opens the SQLite
//! person store, and either grows the population or serves it over HTTP.
//!
//! ```
//! kindred generate --count 500 --seed 7
//! kindred serve --populate
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kindred_server::{ServerConfig, populate};
use kindred_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Kindred family-tree generator")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "kindred.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the population as JSON at `GET /people`.
  Serve {
    /// Grow the population to the configured size before serving.
    #[arg(long)]
    populate: bool,
  },
  /// Grow the population up to a target size; a no-op if already there.
  Generate {
    /// Target population size (defaults to `population` from config).
    #[arg(long)]
    count: Option<u64>,

    /// Seed for reproducible output (overrides `seed` from config).
    #[arg(long)]
    seed: Option<u64>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Generate { count, seed } => {
      let target = count.unwrap_or(cfg.population);
      let report = populate(store, &cfg, target, seed).await?;
      println!(
        "created {} people in {} steps; population is now {}",
        report.created, report.steps, report.total
      );
    }
    Command::Serve { populate: grow } => {
      if grow {
        populate(store.clone(), &cfg, cfg.population, None).await?;
      }

      let app = kindred_api::api_router(Arc::new(store));
      let address = cfg.address();

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
    }
  }

  Ok(())
}
