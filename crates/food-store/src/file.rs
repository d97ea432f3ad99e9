//! # File-backed Document Store
//!
//! Keeps every collection in memory and writes a full JSON snapshot after
//! each mutation. Writes go to a temp file that is renamed over the
//! snapshot, so a crash leaves either the old or the new state on disk.
//!
//! Mutations hold the write lock across the disk write; the in-memory
//! state only advances once the snapshot is durable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use food_core::{
    AdminRecord, ApprovalState, CartLineItem, Collections, DocumentStore, Identity,
    RestaurantProfile, StoreError, StoreResult,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// On-disk snapshot layout
#[derive(Serialize, Deserialize)]
struct Snapshot {
    saved_at: DateTime<Utc>,
    collections: Collections,
}

pub struct FileStore {
    path: PathBuf,
    docs: RwLock<Collections>,
}

impl FileStore {
    /// Open the snapshot at `path`, creating an empty one if absent.
    ///
    /// An unreadable, unwritable or corrupt snapshot is an error; callers
    /// treat it as fatal.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let docs = match fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|e| {
                    StoreError::Serialization(format!("{}: {}", path.display(), e))
                })?;
                info!(
                    "Loaded {} identities, {} restaurants, {} cart items from {} (saved {})",
                    snapshot.collections.identities.len(),
                    snapshot.collections.restaurants.len(),
                    snapshot.collections.cart_items.len(),
                    path.display(),
                    snapshot.saved_at
                );
                snapshot.collections
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(|e| backend_error(parent, e))?;
                }
                let docs = Collections::new();
                write_snapshot(&path, &docs).await?;
                info!("Created empty store at {}", path.display());
                docs
            }
            Err(e) => return Err(backend_error(&path, e)),
        };

        Ok(Self {
            path,
            docs: RwLock::new(docs),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a mutation to a copy, persist it, then swap it in.
    async fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Collections) -> StoreResult<T> + Send,
    ) -> StoreResult<T> {
        let mut docs = self.docs.write().await;
        let mut next = docs.clone();
        let out = apply(&mut next)?;
        write_snapshot(&self.path, &next).await?;
        *docs = next;
        Ok(out)
    }
}

async fn write_snapshot(path: &Path, docs: &Collections) -> StoreResult<()> {
    let snapshot = Snapshot {
        saved_at: Utc::now(),
        collections: docs.clone(),
    };
    let bytes = serde_json::to_vec_pretty(&snapshot)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)
        .await
        .map_err(|e| backend_error(&tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| backend_error(path, e))?;

    debug!("Snapshot written to {}", path.display());
    Ok(())
}

fn backend_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Backend(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn insert_identity(&self, identity: Identity) -> StoreResult<Identity> {
        self.mutate(|docs| docs.insert_identity(identity)).await
    }

    async fn get_identity(&self, id: &str) -> StoreResult<Option<Identity>> {
        Ok(self.docs.read().await.get_identity(id).cloned())
    }

    async fn find_identity_by_email(&self, email: &str) -> StoreResult<Option<Identity>> {
        Ok(self.docs.read().await.find_identity_by_email(email).cloned())
    }

    async fn set_approval(&self, id: &str, approval: ApprovalState) -> StoreResult<Identity> {
        self.mutate(|docs| docs.set_approval(id, approval)).await
    }

    async fn delete_identity(&self, id: &str) -> StoreResult<()> {
        self.mutate(|docs| {
            docs.delete_identity(id);
            Ok(())
        })
        .await
    }

    async fn list_identities(&self) -> StoreResult<Vec<Identity>> {
        Ok(self.docs.read().await.identities.clone())
    }

    async fn insert_restaurant(
        &self,
        restaurant: RestaurantProfile,
    ) -> StoreResult<RestaurantProfile> {
        self.mutate(|docs| docs.insert_restaurant(restaurant)).await
    }

    async fn get_restaurant(&self, id: &str) -> StoreResult<Option<RestaurantProfile>> {
        Ok(self.docs.read().await.get_restaurant(id).cloned())
    }

    async fn find_restaurant_by_owner(
        &self,
        owner_id: &str,
    ) -> StoreResult<Option<RestaurantProfile>> {
        Ok(self
            .docs
            .read()
            .await
            .find_restaurant_by_owner(owner_id)
            .cloned())
    }

    async fn list_restaurants(&self) -> StoreResult<Vec<RestaurantProfile>> {
        Ok(self.docs.read().await.restaurants.clone())
    }

    async fn get_admin(&self) -> StoreResult<Option<AdminRecord>> {
        Ok(self.docs.read().await.admin.clone())
    }

    async fn put_admin(&self, admin: AdminRecord) -> StoreResult<()> {
        self.mutate(|docs| {
            docs.admin = Some(admin);
            Ok(())
        })
        .await
    }

    async fn update_promotions(&self, restaurant_ids: Vec<String>) -> StoreResult<AdminRecord> {
        self.mutate(|docs| docs.update_promotions(restaurant_ids))
            .await
    }

    async fn insert_cart_item(&self, item: CartLineItem) -> StoreResult<CartLineItem> {
        self.mutate(|docs| {
            docs.cart_items.push(item.clone());
            Ok(item)
        })
        .await
    }

    async fn cart_items_for(&self, user_id: &str) -> StoreResult<Vec<CartLineItem>> {
        Ok(self.docs.read().await.cart_items_for(user_id))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
