//! # food-core
//!
//! Core types and services for the food-delivery platform.
//!
//! This crate provides:
//! - `Identity`, `Role` and `ApprovalState` for registered principals
//! - `RestaurantProfile` and `AdminRecord` for the restaurant directory
//! - `CartLineItem` for carts
//! - `DocumentStore` trait and the in-memory `MemoryStore`
//! - `AccountService`, `ApprovalService`, `RestaurantDirectory` and
//!   `CartAggregator`, the operations the HTTP layer calls
//! - `PlatformError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use food_core::{AccountService, MemoryStore, Registration};
//! use std::sync::Arc;
//!
//! let accounts = AccountService::new(Arc::new(MemoryStore::new()));
//!
//! accounts.register(Registration {
//!     username: Some("alice".into()),
//!     email: Some("a@x.com".into()),
//!     usertype: Some("customer".into()),
//!     password: Some("pw123".into()),
//!     ..Default::default()
//! }).await?;
//!
//! let alice = accounts.login("a@x.com", "pw123").await?;
//! assert!(alice.approval.is_approved());
//! ```

pub mod accounts;
pub mod aggregator;
pub mod approval;
pub mod cart;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod identity;
pub mod memory;
pub mod restaurant;
pub mod store;

// Re-exports for convenience
pub use accounts::{AccountService, Registration, RegistrationResult};
pub use aggregator::CartAggregator;
pub use approval::ApprovalService;
pub use cart::{CartLineItem, NewCartItem};
pub use credentials::{CredentialStore, NewIdentity};
pub use directory::RestaurantDirectory;
pub use error::{ErrorKind, PlatformError, PlatformResult, StoreError, StoreResult};
pub use identity::{ApprovalState, Identity, PublicIdentity, Role};
pub use memory::MemoryStore;
pub use restaurant::{AdminRecord, FoodItem, RestaurantProfile};
pub use store::{Collections, DocumentStore, SharedStore};
