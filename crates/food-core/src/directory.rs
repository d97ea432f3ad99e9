//! # Restaurant Directory
//!
//! One profile per restaurant-owner identity, plus the promoted-restaurant
//! list kept on the administrator record.

use crate::error::{PlatformError, PlatformResult, StoreError};
use crate::restaurant::{AdminRecord, RestaurantProfile};
use crate::store::SharedStore;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct RestaurantDirectory {
    store: SharedStore,
}

impl RestaurantDirectory {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Create a profile with an empty menu for an owner identity
    #[instrument(skip(self, address, main_img))]
    pub async fn create(
        &self,
        owner_id: &str,
        title: &str,
        address: Option<String>,
        main_img: Option<String>,
    ) -> PlatformResult<RestaurantProfile> {
        let profile = RestaurantProfile::new(owner_id, title, address, main_img);
        let profile = self.store.insert_restaurant(profile).await?;
        info!("Created restaurant {} for owner {}", profile.id, owner_id);
        Ok(profile)
    }

    pub async fn find_by_id(&self, id: &str) -> PlatformResult<Option<RestaurantProfile>> {
        Ok(self.store.get_restaurant(id).await?)
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> PlatformResult<Option<RestaurantProfile>> {
        Ok(self.store.find_restaurant_by_owner(owner_id).await?)
    }

    pub async fn list_all(&self) -> PlatformResult<Vec<RestaurantProfile>> {
        Ok(self.store.list_restaurants().await?)
    }

    /// Current promoted-restaurant IDs
    pub async fn promoted_restaurants(&self) -> PlatformResult<Vec<String>> {
        let admin = self
            .store
            .get_admin()
            .await?
            .ok_or(PlatformError::AdminRecordMissing)?;
        Ok(admin.promoted_restaurants)
    }

    /// Replace the promoted-restaurant list on the administrator record
    #[instrument(skip(self), fields(count = restaurant_ids.len()))]
    pub async fn update_promotion_list(
        &self,
        restaurant_ids: Vec<String>,
    ) -> PlatformResult<AdminRecord> {
        let admin = self
            .store
            .update_promotions(restaurant_ids)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => PlatformError::AdminRecordMissing,
                other => PlatformError::Storage(other),
            })?;
        info!(
            "Promote list updated: {} restaurants",
            admin.promoted_restaurants.len()
        );
        Ok(admin)
    }
}
