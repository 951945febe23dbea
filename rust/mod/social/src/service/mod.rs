pub mod schema;
pub mod user;
pub mod session;
pub mod graph;
pub mod tweet;
pub mod gate;

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation};
use thiserror::Error;

use chirp_core::ServiceError;
use chirp_sql::{SQLError, SQLStore};

pub use gate::Access;

/// Message for every missing, malformed or badly signed credential.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid JWT Token";

/// Message for every denied or missing tweet.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid Request";

/// Social service error type.
#[derive(Debug, Error)]
pub enum SocialError {
    /// Rejected input (duplicate user, short password, bad login).
    #[error("{0}")]
    Validation(String),

    /// The bearer credential is absent, malformed or fails verification.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The acting user may not touch the tweet, or it does not exist.
    #[error("denied")]
    Denied,

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<SQLError> for SocialError {
    fn from(e: SQLError) -> Self {
        SocialError::Storage(e.to_string())
    }
}

impl From<SocialError> for ServiceError {
    fn from(e: SocialError) -> Self {
        match e {
            SocialError::Validation(m) => ServiceError::Validation(m),
            SocialError::InvalidCredential(_) => {
                ServiceError::Unauthenticated(INVALID_TOKEN_MESSAGE.to_string())
            }
            SocialError::Denied => ServiceError::InvalidRequest(INVALID_REQUEST_MESSAGE.to_string()),
            SocialError::Storage(m) => ServiceError::Storage(m),
            SocialError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// Configuration for the social service.
#[derive(Debug, Clone)]
pub struct SocialConfig {
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Token lifetime in seconds. `None` issues tokens that never expire.
    pub token_ttl_secs: Option<i64>,
    /// Maximum number of entries in the home feed.
    pub feed_limit: usize,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "chirp-dev-secret-change-me".to_string(),
            token_ttl_secs: None,
            feed_limit: 4,
        }
    }
}

/// The social service. Holds the store handle and signing keys.
pub struct SocialService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) config: SocialConfig,
    pub(crate) encoding_key: EncodingKey,
    pub(crate) decoding_key: DecodingKey,
    pub(crate) validation: Validation,
}

impl SocialService {
    /// Create a new SocialService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>, config: SocialConfig) -> Result<Arc<Self>, SocialError> {
        if config.jwt_secret.is_empty() {
            return Err(SocialError::Internal("JWT secret is empty".into()));
        }
        schema::init_schema(sql.as_ref())?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = config.token_ttl_secs.is_some();
        if validation.validate_exp {
            validation.required_spec_claims.insert("exp".to_string());
        }

        Ok(Arc::new(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            sql,
            config,
        }))
    }

    pub fn config(&self) -> &SocialConfig {
        &self.config
    }
}
