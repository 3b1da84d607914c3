//! Startup checks and store initialization.

use std::path::PathBuf;
use std::sync::Arc;

use pictweet_core::ServiceConfig;
use pictweet_sql::{SQLStore, SqliteStore};
use tracing::info;

use crate::config::ServerConfig;

/// Refuse to start on a configuration that cannot work.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.session.secret.is_empty() {
        anyhow::bail!("Session secret is empty in configuration.");
    }
    if config.session.expire_secs <= 0 {
        anyhow::bail!(
            "Session expire_secs must be positive, got {}.",
            config.session.expire_secs
        );
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    Ok(())
}

/// Core settings derived from the file plus CLI overrides.
pub fn service_config(config: &ServerConfig, listen: &str) -> ServiceConfig {
    ServiceConfig {
        data_dir: Some(PathBuf::from(&config.storage.data_dir)),
        sqlite_path: config.storage.sqlite_path.as_ref().map(PathBuf::from),
        listen: listen.to_string(),
    }
}

/// Create the data directory and open the shared SQL store.
pub fn open_store(config: &ServiceConfig) -> anyhow::Result<Arc<dyn SQLStore>> {
    if let Some(dir) = &config.data_dir {
        std::fs::create_dir_all(dir)?;
    }
    let path = config.resolve_sqlite_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let sql = SqliteStore::open(&path)
        .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?;
    info!("SQL store at {}", path.display());
    Ok(Arc::new(sql))
}
