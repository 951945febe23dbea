//! Social module: accounts, tweets, the follow graph, likes and replies.
//!
//! # Layers
//!
//! - **model**: request/response bodies and stored records
//! - **service**: `SocialService`, the store accessors, session tokens and the
//!   access gate
//! - **api**: axum handlers and the bearer-token middleware
//!
//! # Usage
//!
//! ```ignore
//! use social::{SocialModule, service::SocialConfig};
//!
//! let module = SocialModule::new(sql, SocialConfig::default())?;
//! let router = module.routes(); // Mounted at the root
//! ```

pub mod model;
pub mod service;
pub mod api;

use std::sync::Arc;

use axum::Router;

use chirp_core::{Module, ServiceError};
use chirp_sql::SQLStore;

use crate::service::{SocialConfig, SocialService};

/// Social module implementing the Module trait.
pub struct SocialModule {
    service: Arc<SocialService>,
}

impl SocialModule {
    /// Create a new SocialModule. Initializes the schema.
    pub fn new(sql: Arc<dyn SQLStore>, config: SocialConfig) -> Result<Self, ServiceError> {
        let service = SocialService::new(sql, config).map_err(ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying SocialService.
    pub fn service(&self) -> &Arc<SocialService> {
        &self.service
    }
}

impl Module for SocialModule {
    fn name(&self) -> &str {
        "social"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
