//! # Restaurant Types
//!
//! Restaurant profiles, their menus, and the administrator record
//! holding the promoted-restaurant list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dish on a restaurant's menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Unit price in the platform currency
    pub price: f64,

    /// Discount percentage (0-100)
    #[serde(default)]
    pub discount: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_img: Option<String>,
}

/// Menu and metadata record owned by a restaurant-owner identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    /// Unique restaurant ID (generated)
    #[serde(rename = "_id")]
    pub id: String,

    /// Identity this profile belongs to (1:1)
    pub owner_id: String,

    /// Display title (the owner's username at registration)
    pub title: String,

    #[serde(default)]
    pub address: Option<String>,

    /// Primary image reference
    #[serde(default)]
    pub main_img: Option<String>,

    /// Menu, in display order
    #[serde(default)]
    pub menu: Vec<FoodItem>,

    pub created_at: DateTime<Utc>,
}

impl RestaurantProfile {
    /// Create a profile with an empty menu
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        address: Option<String>,
        main_img: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            title: title.into(),
            address,
            main_img,
            menu: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Platform-wide administrator record.
///
/// Provisioned externally (config or seed); operations that mutate it
/// never create it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    /// Restaurant IDs currently promoted
    #[serde(default)]
    pub promoted_restaurants: Vec<String>,
}

impl AdminRecord {
    pub fn new(promoted_restaurants: Vec<String>) -> Self {
        Self {
            promoted_restaurants,
        }
    }

    pub fn is_promoted(&self, restaurant_id: &str) -> bool {
        self.promoted_restaurants.iter().any(|id| id == restaurant_id)
    }
}
