//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the document store and the core services built on it.

use food_core::{
    AccountService, ApprovalService, CartAggregator, RestaurantDirectory, SharedStore,
};
use food_store::{connect, provision_admin, PlatformConfig, StoreConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

/// Matches the request body limit existing clients were built against
pub const DEFAULT_MAX_BODY_BYTES: usize = 30 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Platform file that provisions the admin record
    pub platform_config: PathBuf,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6001),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            platform_config: std::env::var("PLATFORM_CONFIG")
                .unwrap_or_else(|_| "config/platform.toml".to_string())
                .into(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6001,
            environment: "development".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            platform_config: "config/platform.toml".into(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub accounts: AccountService,
    /// Approve / reject
    pub approvals: ApprovalService,
    /// Restaurant profiles and promotions
    pub directory: RestaurantDirectory,
    /// Cart line items
    pub cart: CartAggregator,
    /// Backing store (user listing)
    pub store: SharedStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Connect the configured store and provision the admin record.
    ///
    /// Any failure here is fatal to startup.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let store_config = StoreConfig::from_env();

        let store = connect(&store_config).await.map_err(|e| {
            anyhow::anyhow!(
                "Failed to open store at {}: {}",
                store_config.path.display(),
                e
            )
        })?;
        info!(
            "Connected to {} store at {}",
            store.backend_name(),
            store_config.path.display()
        );

        let platform = PlatformConfig::load(&config.platform_config)?;
        provision_admin(store.as_ref(), platform.as_ref())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to provision admin record: {}", e))?;

        Ok(Self::with_store(store, config))
    }

    /// Build state over an already-open store
    pub fn with_store(store: SharedStore, config: AppConfig) -> Self {
        Self {
            accounts: AccountService::new(store.clone()),
            approvals: ApprovalService::new(store.clone()),
            directory: RestaurantDirectory::new(store.clone()),
            cart: CartAggregator::new(store.clone()),
            store,
            config,
        }
    }
}
