//! # food-store
//!
//! Durable document store for food-delivery-rs.
//!
//! - **FileStore** - every collection in memory, persisted as one JSON
//!   snapshot rewritten atomically after each mutation
//! - **StoreConfig** - snapshot location from the environment
//! - **PlatformConfig** - `config/platform.toml`, which provisions the
//!   administrator record
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use food_store::{connect, provision_admin, PlatformConfig, StoreConfig};
//!
//! let store = connect(&StoreConfig::from_env()).await?;
//! let platform = PlatformConfig::load("config/platform.toml".as_ref())?;
//! provision_admin(store.as_ref(), platform.as_ref()).await?;
//! ```

pub mod config;
pub mod file;
pub mod provision;

// Re-exports
pub use config::{AdminSeed, ConfigError, PlatformConfig, StoreConfig, DEFAULT_STORE_PATH};
pub use file::FileStore;
pub use provision::{connect, provision_admin};
