//! # Request Handlers
//!
//! Axum request handlers for the platform API.
//! Each handler calls one core operation and serializes its result.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use food_core::{
    CartLineItem, NewCartItem, PlatformError, PublicIdentity, Registration, RestaurantProfile,
    Role,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Promote list update request.
///
/// Kept as raw JSON so a non-array value reaches validation instead of
/// failing extraction.
#[derive(Debug, Deserialize)]
pub struct PromoteListRequest {
    #[serde(default, rename = "promoteList")]
    pub promote_list: Option<serde_json::Value>,
}

/// Approve / reject request
#[derive(Debug, Deserialize)]
pub struct UserIdRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Registration / login response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: String,
    pub user: PublicIdentity,
}

/// A customer's cart
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub total: f64,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
        }
    }
}

/// Everything a handler can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Platform(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Body(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Top-level message and error string shown to clients.
    ///
    /// Internal failures collapse to a generic pair; the cause is only logged.
    fn to_body(&self) -> ErrorResponse {
        match self {
            ApiError::Body(rejection) => {
                ErrorResponse::new("Invalid request body", rejection.body_text())
            }
            ApiError::Platform(e) if e.is_internal() => {
                ErrorResponse::new("Server Error", "internal error")
            }
            ApiError::Platform(e) => {
                let message = match e {
                    PlatformError::MissingFields(_) => "Missing required fields".to_string(),
                    PlatformError::InvalidRequest(msg) => msg.clone(),
                    PlatformError::InvalidUserType { .. } => "Invalid user type".to_string(),
                    PlatformError::DuplicateEmail { .. } => "User already exists".to_string(),
                    PlatformError::InvalidCredentials => "Invalid email or password".to_string(),
                    PlatformError::UserNotFound { .. } => "User not found".to_string(),
                    PlatformError::RestaurantNotFound { .. } => "Restaurant not found".to_string(),
                    PlatformError::AdminRecordMissing => "Admin record not found".to_string(),
                    other => other.to_string(),
                };
                ErrorResponse::new(message, e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(self.to_body())).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "food-delivery",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Register a customer, restaurant owner or administrator
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let Json(request) = payload?;
    let result = state.accounts.register(request).await?;

    let message = if result.identity.role == Role::Restaurant {
        "Restaurant registered"
    } else {
        "User registered"
    };

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: message.to_string(),
            user: result.identity.to_public(),
        }),
    ))
}

/// Check credentials and return the identity
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(request) = payload?;
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let identity = state.accounts.login(&email, &password).await?;

    Ok(Json(UserResponse {
        message: "Login successful".to_string(),
        user: identity.to_public(),
    }))
}

/// Replace the promoted-restaurant list
#[instrument(skip(state, payload))]
pub async fn update_promote_list(
    State(state): State<AppState>,
    payload: Result<Json<PromoteListRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    let ids = parse_promote_list(request.promote_list)?;

    state.directory.update_promotion_list(ids).await?;

    Ok(Json(MessageResponse::new("Promote list updated successfully")))
}

fn parse_promote_list(value: Option<serde_json::Value>) -> Result<Vec<String>, PlatformError> {
    let invalid = || PlatformError::InvalidRequest("Invalid promote list".to_string());

    let Some(serde_json::Value::Array(items)) = value else {
        return Err(invalid());
    };

    items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::String(id) => Ok(id),
            _ => Err(invalid()),
        })
        .collect()
}

/// Approve an identity
#[instrument(skip(state, payload))]
pub async fn approve_user(
    State(state): State<AppState>,
    payload: Result<Json<UserIdRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = required_id(payload?)?;
    state.approvals.approve(&id).await?;
    Ok(Json(MessageResponse::new("User approved")))
}

/// Reject an identity
#[instrument(skip(state, payload))]
pub async fn reject_user(
    State(state): State<AppState>,
    payload: Result<Json<UserIdRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = required_id(payload?)?;
    state.approvals.reject(&id).await?;
    Ok(Json(MessageResponse::new("User rejected")))
}

fn required_id(Json(request): Json<UserIdRequest>) -> Result<String, PlatformError> {
    request
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| PlatformError::MissingFields("User ID is required".to_string()))
}

/// List all identities
pub async fn fetch_users(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicIdentity>>> {
    let users = state.accounts.list_identities().await?;
    Ok(Json(users.iter().map(PublicIdentity::from).collect()))
}

/// List all restaurants
pub async fn fetch_restaurants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RestaurantProfile>>> {
    Ok(Json(state.directory.list_all().await?))
}

/// Append a line item to a customer's cart
#[instrument(skip(state, payload))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    payload: Result<Json<NewCartItem>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(draft) = payload?;
    let item = state.cart.add_item(draft).await?;
    info!("Cart item {} stored", item.id);
    Ok(Json(MessageResponse::new("Item added to cart")))
}

/// A customer's cart with its total
pub async fn fetch_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<CartResponse>> {
    let items = state.cart.items_for(&user_id).await?;
    let total = items.iter().map(CartLineItem::line_total).sum();
    Ok(Json(CartResponse { items, total }))
}
