//! # Store Provisioning
//!
//! Startup helpers: open the configured store and seed the administrator
//! record from the platform file.

use crate::config::{PlatformConfig, StoreConfig};
use crate::file::FileStore;
use food_core::{AdminRecord, DocumentStore, SharedStore, StoreResult};
use std::sync::Arc;
use tracing::info;

/// Open the document store named by `config`.
pub async fn connect(config: &StoreConfig) -> StoreResult<SharedStore> {
    let store = FileStore::open(&config.path).await?;
    Ok(Arc::new(store))
}

/// Seed the administrator record if the store holds none.
///
/// An existing record is never overwritten; its promoted list belongs
/// to the running platform. Returns true if a record was written.
pub async fn provision_admin(
    store: &dyn DocumentStore,
    platform: Option<&PlatformConfig>,
) -> StoreResult<bool> {
    if store.get_admin().await?.is_some() {
        return Ok(false);
    }

    let Some(seed) = platform.and_then(|p| p.admin.clone()) else {
        info!("No admin record in store or platform config; promote list updates will fail");
        return Ok(false);
    };

    let admin = AdminRecord::from(seed);
    info!(
        "Provisioning admin record with {} promoted restaurants",
        admin.promoted_restaurants.len()
    );
    store.put_admin(admin).await?;
    Ok(true)
}
