//! Startup checks and store opening.

use std::sync::Arc;

use tracing::info;

use chirp_core::ServiceConfig;
use chirp_sql::{SQLStore, SqliteStore};

use crate::config::ServerConfig;

/// Refuse to start on a configuration that cannot work.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.jwt.secret.is_empty() {
        anyhow::bail!("JWT secret is empty in configuration.");
    }
    if let Some(ttl) = config.jwt.ttl_secs {
        if ttl <= 0 {
            anyhow::bail!("jwt.ttl_secs must be positive, got {}.", ttl);
        }
    }
    if config.server.listen.is_empty() {
        anyhow::bail!("server.listen is empty in configuration.");
    }
    Ok(())
}

/// Open the SQLite store, creating the file and its directory if needed.
pub fn open_store(core: &ServiceConfig) -> anyhow::Result<Arc<dyn SQLStore>> {
    let path = core.resolve_sqlite_path();
    let store = SqliteStore::open(&path)
        .map_err(|e| anyhow::anyhow!("failed to open SQL store at {}: {}", path.display(), e))?;
    info!("SQL store opened at {}", path.display());
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_config_defaults_ok() {
        assert!(verify_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_verify_config_empty_secret() {
        let mut config = ServerConfig::default();
        config.jwt.secret.clear();
        assert!(verify_config(&config).is_err());
    }

    #[test]
    fn test_verify_config_bad_ttl() {
        let mut config = ServerConfig::default();
        config.jwt.ttl_secs = Some(0);
        assert!(verify_config(&config).is_err());
        config.jwt.ttl_secs = Some(60);
        assert!(verify_config(&config).is_ok());
    }

    #[test]
    fn test_open_store_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let core = ServiceConfig {
            data_dir: Some(dir.path().join("nested")),
            ..Default::default()
        };
        let store = open_store(&core).unwrap();
        store.exec("CREATE TABLE t (x INTEGER)", &[]).unwrap();
        assert!(dir.path().join("nested").join("twitterClone.db").exists());
    }
}
