pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod validation;

use crate::config::Config;
use crate::db::{
    DbStore,
    repositories::{MemorySpaceRepo, RedisSpaceRepo},
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthConfig, AuthService};
use crate::middleware::cors::CorsPolicy;
use crate::services::SpacesDispatcher;
use std::sync::Arc;
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: SpacesDispatcher,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(config: Config, store: DbStore) -> AppResult<Self> {
        let auth_config = match config.jwt_public_key_pem {
            Some(ref pem) => AuthConfig::RsaPublicKey(pem.clone()),
            None => AuthConfig::Secret(config.jwt_secret.clone()),
        };
        let auth_service = AuthService::new(auth_config)?;
        let dispatcher = SpacesDispatcher::new(store, CorsPolicy::new(config.allowed_origin()));

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
            auth_service,
        })
    }
}

/// Builds the store handle shared by every request: Redis when `REDIS_URL`
/// is set, the in-process store otherwise.
pub async fn connect_store(config: &Config) -> AppResult<DbStore> {
    match config.redis_url {
        Some(ref url) => {
            let client = redis::Client::open(url.as_str())
                .map_err(|e| AppError::Config(format!("Invalid REDIS_URL: {}", e)))?;
            let repo = RedisSpaceRepo::connect(&client, config.spaces_table_name.clone()).await?;
            tracing::info!(table = %config.spaces_table_name, "Using Redis space store");
            Ok(Arc::new(repo))
        }
        None => {
            tracing::warn!("REDIS_URL not set, spaces are kept in memory");
            Ok(Arc::new(MemorySpaceRepo::new()))
        }
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_max_level(level)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .init();
        }
    }
}
