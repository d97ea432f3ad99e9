//! # Cart Aggregator
//!
//! Appends line items to a customer's cart. Every call adds a new line,
//! even for a food item already in the cart; prices are taken as given.

use crate::cart::{CartLineItem, NewCartItem};
use crate::error::{PlatformError, PlatformResult};
use crate::store::SharedStore;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct CartAggregator {
    store: SharedStore,
}

impl CartAggregator {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Validate and append one line item.
    ///
    /// The restaurant is resolved once, here, and its current title copied
    /// into the line. Restaurants are never deleted, so the check cannot be
    /// invalidated before the insert lands.
    #[instrument(skip(self, draft), fields(user_id = ?draft.user_id, restaurant_id = ?draft.restaurant_id))]
    pub async fn add_item(&self, mut draft: NewCartItem) -> PlatformResult<CartLineItem> {
        let user_id = non_empty(draft.user_id.take());
        let food_item_id = non_empty(draft.food_item_id.take());
        let quantity = draft.quantity.filter(|q| *q > 0);

        let (Some(user_id), Some(food_item_id), Some(quantity)) = (user_id, food_item_id, quantity)
        else {
            return Err(PlatformError::MissingFields(
                "userId, foodItemId and quantity are required".to_string(),
            ));
        };

        let restaurant_id = draft.restaurant_id.take().unwrap_or_default();
        let restaurant = self
            .store
            .get_restaurant(&restaurant_id)
            .await?
            .ok_or_else(|| PlatformError::RestaurantNotFound {
                restaurant_id: restaurant_id.clone(),
            })?;

        let item = CartLineItem::snapshot(user_id, food_item_id, &restaurant, draft, quantity);
        let item = self.store.insert_cart_item(item).await?;

        info!(
            "Added {} x {} from {} to cart of {}",
            item.quantity, item.food_item_id, item.restaurant_name, item.user_id
        );
        Ok(item)
    }

    /// A customer's cart, oldest line first
    pub async fn items_for(&self, user_id: &str) -> PlatformResult<Vec<CartLineItem>> {
        Ok(self.store.cart_items_for(user_id).await?)
    }

    /// Sum of all line totals in a customer's cart
    pub async fn cart_total(&self, user_id: &str) -> PlatformResult<f64> {
        let items = self.items_for(user_id).await?;
        Ok(items.iter().map(CartLineItem::line_total).sum())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::restaurant::RestaurantProfile;
    use crate::store::DocumentStore;
    use std::sync::Arc;

    async fn setup() -> (CartAggregator, RestaurantProfile) {
        let store = Arc::new(MemoryStore::new());
        let restaurant = store
            .insert_restaurant(RestaurantProfile::new("owner-1", "Bob's Diner", None, None))
            .await
            .unwrap();
        (CartAggregator::new(store), restaurant)
    }

    fn draft(restaurant_id: &str) -> NewCartItem {
        NewCartItem {
            user_id: Some("user-1".into()),
            food_item_id: Some("food-1".into()),
            food_item_name: Some("Burger".into()),
            restaurant_id: Some(restaurant_id.into()),
            price: Some(8.5),
            quantity: Some(2),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_item_snapshots_restaurant_name() {
        let (cart, restaurant) = setup().await;

        let item = cart.add_item(draft(&restaurant.id)).await.unwrap();

        assert_eq!(item.restaurant_name, "Bob's Diner");
        assert_eq!(item.quantity, 2);
        assert_eq!(cart.items_for("user-1").await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn test_unknown_restaurant() {
        let (cart, _) = setup().await;

        let err = cart.add_item(draft("missing")).await.unwrap_err();
        assert!(matches!(err, PlatformError::RestaurantNotFound { .. }));

        let mut no_restaurant = draft("x");
        no_restaurant.restaurant_id = None;
        let err = cart.add_item(no_restaurant).await.unwrap_err();
        assert!(matches!(err, PlatformError::RestaurantNotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (cart, restaurant) = setup().await;

        let mut zero = draft(&restaurant.id);
        zero.quantity = Some(0);
        assert!(matches!(
            cart.add_item(zero).await,
            Err(PlatformError::MissingFields(_))
        ));

        let mut blank_user = draft(&restaurant.id);
        blank_user.user_id = Some("  ".into());
        assert!(matches!(
            cart.add_item(blank_user).await,
            Err(PlatformError::MissingFields(_))
        ));

        assert!(cart.items_for("user-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_item_twice_appends() {
        let (cart, restaurant) = setup().await;

        cart.add_item(draft(&restaurant.id)).await.unwrap();
        cart.add_item(draft(&restaurant.id)).await.unwrap();

        assert_eq!(cart.items_for("user-1").await.unwrap().len(), 2);
        assert_eq!(cart.cart_total("user-1").await.unwrap(), 34.0);
    }
}
