use std::path::PathBuf;

/// Default database file name, relative to the data directory.
pub const DEFAULT_SQLITE_FILE: &str = "twitterClone.db";

/// Default listen address for the HTTP server.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";

/// Storage and listen settings shared by service binaries.
///
/// The binary fills this from its config file and CLI flags, then hands the
/// resolved paths to the storage layer.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the database file.
    pub data_dir: Option<PathBuf>,

    /// Path to the SQLite database file.
    /// Defaults to `{data_dir}/twitterClone.db` if not specified.
    pub sqlite_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sqlite_path: None,
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the SQLite database path, falling back to `{data_dir}/twitterClone.db`.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath(DEFAULT_SQLITE_FILE))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
