//! # Document Store Trait
//!
//! Storage abstraction over the four platform collections.
//! Implementations: [`MemoryStore`](crate::memory::MemoryStore) here,
//! `FileStore` in `food-store`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   DocumentStore (trait)                     │
//! │  ├── identities        (unique index on email)              │
//! │  ├── restaurants       (unique index on owner_id)           │
//! │  ├── admin             (singleton, externally provisioned)  │
//! │  └── cart_items        (append only)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!               ┌────────────┴────────────┐
//!       ┌───────┴───────┐         ┌───────┴───────┐
//!       │  MemoryStore  │         │   FileStore   │
//!       └───────────────┘         └───────────────┘
//! ```
//!
//! Uniqueness is enforced inside each insert, under the backend's write
//! lock, so concurrent registrations for one email cannot both succeed.

use crate::cart::CartLineItem;
use crate::error::{StoreError, StoreResult};
use crate::identity::{ApprovalState, Identity};
use crate::restaurant::{AdminRecord, RestaurantProfile};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Core trait for document store backends.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new identity.
    ///
    /// Fails with `StoreError::UniqueViolation` if the email is taken.
    async fn insert_identity(&self, identity: Identity) -> StoreResult<Identity>;

    async fn get_identity(&self, id: &str) -> StoreResult<Option<Identity>>;

    /// Look up an identity by its (normalized) email
    async fn find_identity_by_email(&self, email: &str) -> StoreResult<Option<Identity>>;

    /// Overwrite an identity's approval state and return the updated record.
    ///
    /// Fails with `StoreError::NotFound` if the id does not resolve.
    async fn set_approval(&self, id: &str, approval: ApprovalState) -> StoreResult<Identity>;

    /// Remove an identity. Missing ids are not an error.
    async fn delete_identity(&self, id: &str) -> StoreResult<()>;

    async fn list_identities(&self) -> StoreResult<Vec<Identity>>;

    /// Insert a restaurant profile.
    ///
    /// Fails with `StoreError::UniqueViolation` if the owner already has one.
    async fn insert_restaurant(&self, restaurant: RestaurantProfile)
        -> StoreResult<RestaurantProfile>;

    async fn get_restaurant(&self, id: &str) -> StoreResult<Option<RestaurantProfile>>;

    async fn find_restaurant_by_owner(&self, owner_id: &str)
        -> StoreResult<Option<RestaurantProfile>>;

    async fn list_restaurants(&self) -> StoreResult<Vec<RestaurantProfile>>;

    async fn get_admin(&self) -> StoreResult<Option<AdminRecord>>;

    /// Provision the administrator record, replacing any existing one
    async fn put_admin(&self, admin: AdminRecord) -> StoreResult<()>;

    /// Replace the promoted-restaurant list.
    ///
    /// Fails with `StoreError::NotFound` if no admin record exists; it is
    /// never created here.
    async fn update_promotions(&self, restaurant_ids: Vec<String>) -> StoreResult<AdminRecord>;

    async fn insert_cart_item(&self, item: CartLineItem) -> StoreResult<CartLineItem>;

    /// Cart items for one customer, in insertion order
    async fn cart_items_for(&self, user_id: &str) -> StoreResult<Vec<CartLineItem>>;

    /// Get the backend name (for logging).
    fn backend_name(&self) -> &'static str;
}

/// Type alias for a shared store (dynamic dispatch)
pub type SharedStore = Arc<dyn DocumentStore>;

/// The full document set, in insertion order per collection.
///
/// Backends hold one of these behind a lock and apply the mutation
/// methods below, which carry the index constraints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub restaurants: Vec<RestaurantProfile>,
    #[serde(default)]
    pub admin: Option<AdminRecord>,
    #[serde(default)]
    pub cart_items: Vec<CartLineItem>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_identity(&mut self, identity: Identity) -> StoreResult<Identity> {
        if self.identities.iter().any(|i| i.email == identity.email) {
            return Err(StoreError::UniqueViolation {
                field: "email".to_string(),
                value: identity.email,
            });
        }
        self.identities.push(identity.clone());
        Ok(identity)
    }

    pub fn get_identity(&self, id: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.id == id)
    }

    pub fn find_identity_by_email(&self, email: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.email == email)
    }

    pub fn set_approval(&mut self, id: &str, approval: ApprovalState) -> StoreResult<Identity> {
        let identity = self
            .identities
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound {
                collection: "identities".to_string(),
                id: id.to_string(),
            })?;
        identity.approval = approval;
        Ok(identity.clone())
    }

    pub fn delete_identity(&mut self, id: &str) {
        self.identities.retain(|i| i.id != id);
    }

    pub fn insert_restaurant(
        &mut self,
        restaurant: RestaurantProfile,
    ) -> StoreResult<RestaurantProfile> {
        if self
            .restaurants
            .iter()
            .any(|r| r.owner_id == restaurant.owner_id)
        {
            return Err(StoreError::UniqueViolation {
                field: "owner_id".to_string(),
                value: restaurant.owner_id,
            });
        }
        self.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    pub fn get_restaurant(&self, id: &str) -> Option<&RestaurantProfile> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn find_restaurant_by_owner(&self, owner_id: &str) -> Option<&RestaurantProfile> {
        self.restaurants.iter().find(|r| r.owner_id == owner_id)
    }

    pub fn update_promotions(&mut self, restaurant_ids: Vec<String>) -> StoreResult<AdminRecord> {
        let admin = self.admin.as_mut().ok_or_else(|| StoreError::NotFound {
            collection: "admin".to_string(),
            id: "singleton".to_string(),
        })?;
        admin.promoted_restaurants = restaurant_ids;
        Ok(admin.clone())
    }

    pub fn cart_items_for(&self, user_id: &str) -> Vec<CartLineItem> {
        self.cart_items
            .iter()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect()
    }
}
