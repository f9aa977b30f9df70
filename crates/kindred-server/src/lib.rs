//! Configuration and wiring for the `kindred` binary.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use kindred_core::store::PersonStore;
use kindred_generator::{GenerationReport, Generator, GeneratorConfig};
use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `kindred.toml` and `KINDRED_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                   String,
  pub port:                   u16,
  pub store_path:             PathBuf,
  /// Population size targeted by `generate` and `serve --populate`.
  pub population:             u64,
  pub seed:                   Option<u64>,
  pub max_selection_attempts: u32,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                   "127.0.0.1".to_string(),
      port:                   3000,
      store_path:             PathBuf::from("kindred.db"),
      population:             1000,
      seed:                   None,
      max_selection_attempts: GeneratorConfig::default().max_selection_attempts,
    }
  }
}

impl ServerConfig {
  /// Layer `path` (optional) under `KINDRED_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("KINDRED"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Grow the population in `store` to `target` persons.
pub async fn populate<S>(
  store:  S,
  config: &ServerConfig,
  target: u64,
  seed:   Option<u64>,
) -> anyhow::Result<GenerationReport>
where
  S: PersonStore,
{
  let mut generator = Generator::seeded(store, seed.or(config.seed)).with_config(GeneratorConfig {
    max_selection_attempts: config.max_selection_attempts,
  });

  generator
    .generate(target)
    .await
    .with_context(|| format!("failed to grow population to {target}"))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::{fs, process};

  use kindred_store_sqlite::SqliteStore;

  use super::*;

  fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("kindred-{}-{name}.toml", process::id()));
    fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/kindred.toml")).unwrap();
    assert_eq!(cfg.population, 1000);
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.seed, None);
  }

  #[test]
  fn file_overrides_defaults() {
    let path = temp_config(
      "overrides",
      "port = 8080\npopulation = 25\nseed = 42\nstore_path = \"/tmp/tree.db\"\n",
    );
    let cfg = ServerConfig::load(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.population, 25);
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/tree.db"));
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    let cfg = ServerConfig { store_path: PathBuf::from("~/kindred.db"), ..Default::default() };
    assert_eq!(cfg.resolved_store_path(), PathBuf::from(home).join("kindred.db"));

    let abs = ServerConfig { store_path: PathBuf::from("/srv/kindred.db"), ..Default::default() };
    assert_eq!(abs.resolved_store_path(), PathBuf::from("/srv/kindred.db"));
  }

  #[tokio::test]
  async fn populate_is_idempotent() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let cfg = ServerConfig { seed: Some(1), ..Default::default() };

    let first = populate(store.clone(), &cfg, 20, None).await.unwrap();
    assert!(first.total >= 20);

    let second = populate(store.clone(), &cfg, 20, None).await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(store.count().await.unwrap(), first.total);
  }
}
