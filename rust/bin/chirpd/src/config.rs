//! Server configuration file.
//!
//! Every section and key is optional; a missing file means all defaults.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:3000"
//!
//! [storage]
//! data_dir = "/var/lib/chirp"
//! # sqlite_path = "/var/lib/chirp/twitterClone.db"
//!
//! [jwt]
//! secret = "change-me"
//! # ttl_secs = 86400
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use chirp_core::config::DEFAULT_LISTEN;
use chirp_core::ServiceConfig;
use social::service::SocialConfig;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the database file. Empty means the working directory.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,

    /// Explicit database file, overriding `data_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqlite_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Token lifetime. Unset issues tokens without `exp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<i64>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            ttl_secs: None,
        }
    }
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_secret() -> String {
    SocialConfig::default().jwt_secret
}

impl ServerConfig {
    /// Load a config file. The file must exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Storage and listen settings for the shared core.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            data_dir: (!self.storage.data_dir.is_empty())
                .then(|| PathBuf::from(&self.storage.data_dir)),
            sqlite_path: self.storage.sqlite_path.as_ref().map(PathBuf::from),
            listen: self.server.listen.clone(),
        }
    }

    /// Settings for the social service.
    pub fn social_config(&self) -> SocialConfig {
        SocialConfig {
            jwt_secret: self.jwt.secret.clone(),
            token_ttl_secs: self.jwt.ttl_secs,
            ..Default::default()
        }
    }
}
