//! # Cart Types
//!
//! Cart line items. Each line snapshots the restaurant name and the
//! caller-supplied price at the moment it was added.

use crate::restaurant::RestaurantProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An add-to-cart request before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub food_item_id: Option<String>,
    #[serde(default)]
    pub food_item_name: Option<String>,
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub food_item_img: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// One pending-purchase record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(rename = "_id")]
    pub id: String,

    /// Customer identity
    pub user_id: String,

    pub food_item_id: String,

    /// Food item name (denormalized for display)
    #[serde(default)]
    pub food_item_name: String,

    pub restaurant_id: String,

    /// Restaurant title as it was when the item was added
    pub restaurant_name: String,

    #[serde(default)]
    pub food_item_img: Option<String>,

    /// Unit price, trusted from the caller
    pub price: f64,

    /// Discount percentage (0-100)
    pub discount: f64,

    /// Always greater than zero
    pub quantity: u32,

    pub created_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Build a line item against the restaurant it was validated with.
    ///
    /// Callers must have checked that `user_id`, `food_item_id` and a
    /// non-zero `quantity` are present.
    pub fn snapshot(
        user_id: impl Into<String>,
        food_item_id: impl Into<String>,
        restaurant: &RestaurantProfile,
        draft: NewCartItem,
        quantity: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            food_item_id: food_item_id.into(),
            food_item_name: draft.food_item_name.unwrap_or_default(),
            restaurant_id: restaurant.id.clone(),
            restaurant_name: restaurant.title.clone(),
            food_item_img: draft.food_item_img,
            price: draft.price.unwrap_or(0.0),
            discount: draft.discount.unwrap_or(0.0),
            quantity,
            created_at: Utc::now(),
        }
    }

    /// Unit price after the percentage discount
    pub fn discounted_price(&self) -> f64 {
        self.price - self.price * self.discount / 100.0
    }

    /// Calculate the total price for this line item
    pub fn line_total(&self) -> f64 {
        self.discounted_price() * self.quantity as f64
    }
}
