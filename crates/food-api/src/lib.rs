//! # food-api
//!
//! HTTP API layer for food-delivery-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - JSON endpoints for accounts, approvals, restaurants and carts
//! - Error mapping from core failures to `{message, error}` bodies
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/register` | Register an identity |
//! | POST | `/login` | Log in |
//! | POST | `/update-promote-list` | Replace promoted restaurants |
//! | POST | `/approve-user` | Approve an identity |
//! | POST | `/reject-user` | Reject an identity |
//! | GET | `/fetch-users` | List identities |
//! | GET | `/fetch-restaurants` | List restaurants |
//! | POST | `/add-to-cart` | Add a cart line item |
//! | GET | `/fetch-cart/{user_id}` | A customer's cart |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
