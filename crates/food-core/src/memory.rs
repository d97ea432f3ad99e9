//! In-memory document store.
//!
//! Fast, non-persistent backend used in tests and for local development.

use crate::cart::CartLineItem;
use crate::error::StoreResult;
use crate::identity::{ApprovalState, Identity};
use crate::restaurant::{AdminRecord, RestaurantProfile};
use crate::store::{Collections, DocumentStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage implementation.
#[derive(Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the administrator record already provisioned
    pub fn with_admin(admin: AdminRecord) -> Self {
        let docs = Collections {
            admin: Some(admin),
            ..Collections::default()
        };
        Self {
            docs: Arc::new(RwLock::new(docs)),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_identity(&self, identity: Identity) -> StoreResult<Identity> {
        self.docs.write().await.insert_identity(identity)
    }

    async fn get_identity(&self, id: &str) -> StoreResult<Option<Identity>> {
        Ok(self.docs.read().await.get_identity(id).cloned())
    }

    async fn find_identity_by_email(&self, email: &str) -> StoreResult<Option<Identity>> {
        Ok(self.docs.read().await.find_identity_by_email(email).cloned())
    }

    async fn set_approval(&self, id: &str, approval: ApprovalState) -> StoreResult<Identity> {
        self.docs.write().await.set_approval(id, approval)
    }

    async fn delete_identity(&self, id: &str) -> StoreResult<()> {
        self.docs.write().await.delete_identity(id);
        Ok(())
    }

    async fn list_identities(&self) -> StoreResult<Vec<Identity>> {
        Ok(self.docs.read().await.identities.clone())
    }

    async fn insert_restaurant(
        &self,
        restaurant: RestaurantProfile,
    ) -> StoreResult<RestaurantProfile> {
        self.docs.write().await.insert_restaurant(restaurant)
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
        self.docs.write().await.admin = Some(admin);
        Ok(())
    }

    async fn update_promotions(&self, restaurant_ids: Vec<String>) -> StoreResult<AdminRecord> {
        self.docs.write().await.update_promotions(restaurant_ids)
    }

    async fn insert_cart_item(&self, item: CartLineItem) -> StoreResult<CartLineItem> {
        self.docs.write().await.cart_items.push(item.clone());
        Ok(item)
    }

    async fn cart_items_for(&self, user_id: &str) -> StoreResult<Vec<CartLineItem>> {
        Ok(self.docs.read().await.cart_items_for(user_id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
