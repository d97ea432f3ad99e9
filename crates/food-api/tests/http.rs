//! End-to-end tests of the HTTP surface against an in-memory store.

use axum::http::StatusCode;
use axum_test::TestServer;
use food_api::{create_router, AppConfig, AppState};
use food_core::{AdminRecord, DocumentStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;

fn server_with(store: MemoryStore) -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let state = AppState::with_store(store.clone(), AppConfig::default());
    let server = TestServer::new(create_router(state)).unwrap();
    (server, store)
}

fn server() -> (TestServer, Arc<MemoryStore>) {
    server_with(MemoryStore::new())
}

async fn register_restaurant(server: &TestServer) -> Value {
    let response = server
        .post("/register")
        .json(&json!({
            "username": "bob",
            "email": "b@x.com",
            "usertype": "restaurant",
            "password": "pw456",
            "restaurantAddress": "123 Main St",
            "restaurantImage": "img.png"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["user"].clone()
}

#[tokio::test]
async fn health_reports_service() {
    let (server, _) = server();

    let body = server.get("/health").await.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "food-delivery");
}

#[tokio::test]
async fn customer_registers_and_logs_in() {
    let (server, _) = server();

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "a@x.com",
            "usertype": "customer",
            "password": "pw123"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "User registered");
    assert_eq!(body["user"]["approval"], "approved");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());

    let response = server
        .post("/login")
        .json(&json!({ "email": "a@x.com", "password": "pw123" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["approval"], "approved");
}

#[tokio::test]
async fn restaurant_registration_creates_pending_owner_and_profile() {
    let (server, store) = server();

    let user = register_restaurant(&server).await;
    assert_eq!(user["approval"], "pending");
    assert_eq!(user["usertype"], "restaurant");

    let owner_id = user["_id"].as_str().unwrap();
    let profile = store
        .find_restaurant_by_owner(owner_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.title, "bob");

    let restaurants = server.get("/fetch-restaurants").await.json::<Value>();
    assert_eq!(restaurants.as_array().unwrap().len(), 1);
    assert_eq!(restaurants[0]["ownerId"], owner_id);
    assert_eq!(restaurants[0]["address"], "123 Main St");
    assert_eq!(restaurants[0]["menu"], json!([]));
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (server, store) = server();
    register_restaurant(&server).await;

    let response = server
        .post("/register")
        .json(&json!({
            "username": "bobby",
            "email": "b@x.com",
            "usertype": "customer",
            "password": "other"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "User already exists");
    assert_eq!(store.list_identities().await.unwrap().len(), 1);
}

#[tokio::test]
async fn registration_validation() {
    let (server, _) = server();

    let response = server
        .post("/register")
        .json(&json!({ "username": "alice", "email": "a@x.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Missing required fields");
    assert!(body["error"].is_string());

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "a@x.com",
            "usertype": "courier",
            "password": "pw"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/register").text("not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Invalid request body");
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let (server, _) = server();
    register_restaurant(&server).await;

    let wrong_password = server
        .post("/login")
        .json(&json!({ "email": "b@x.com", "password": "nope" }))
        .await;
    let unknown_email = server
        .post("/login")
        .json(&json!({ "email": "nobody@x.com", "password": "pw456" }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<Value>(),
        unknown_email.json::<Value>()
    );

    let missing = server.post("/login").json(&json!({ "email": "b@x.com" })).await;
    missing.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn approve_and_reject_transitions() {
    let (server, _) = server();
    let owner_id = register_restaurant(&server).await["_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .post("/approve-user")
        .json(&json!({ "id": owner_id }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "User approved");

    server
        .post("/approve-user")
        .json(&json!({ "id": owner_id }))
        .await
        .assert_status_ok();

    let login = server
        .post("/login")
        .json(&json!({ "email": "b@x.com", "password": "pw456" }))
        .await
        .json::<Value>();
    assert_eq!(login["user"]["approval"], "approved");

    let response = server
        .post("/reject-user")
        .json(&json!({ "id": owner_id }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "User rejected");

    let users = server.get("/fetch-users").await.json::<Value>();
    assert_eq!(users[0]["approval"], "rejected");
}

#[tokio::test]
async fn approval_errors() {
    let (server, _) = server();

    server
        .post("/approve-user")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/reject-user")
        .json(&json!({ "id": "does-not-exist" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "User not found");
}

#[tokio::test]
async fn promote_list_requires_admin_record() {
    let (server, _) = server();

    let response = server
        .post("/update-promote-list")
        .json(&json!({ "promoteList": ["r1"] }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Admin record not found");
}

#[tokio::test]
async fn promote_list_update() {
    let (server, store) = server_with(MemoryStore::with_admin(AdminRecord::default()));

    server
        .post("/update-promote-list")
        .json(&json!({ "promoteList": "r1" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/update-promote-list")
        .json(&json!({ "promoteList": ["r1", "r2"] }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Promote list updated successfully"
    );

    let admin = store.get_admin().await.unwrap().unwrap();
    assert_eq!(admin.promoted_restaurants, vec!["r1", "r2"]);
}

#[tokio::test]
async fn add_to_cart_snapshots_restaurant() {
    let (server, _) = server();
    register_restaurant(&server).await;
    let restaurants = server.get("/fetch-restaurants").await.json::<Value>();
    let restaurant_id = restaurants[0]["_id"].as_str().unwrap().to_string();

    let item = json!({
        "userId": "customer-1",
        "foodItemId": "food-1",
        "foodItemName": "Burger",
        "restaurantId": restaurant_id,
        "foodItemImg": "burger.png",
        "price": 10.0,
        "discount": 10.0,
        "quantity": 2
    });

    let response = server.post("/add-to-cart").json(&item).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Item added to cart");
    server.post("/add-to-cart").json(&item).await.assert_status_ok();

    let cart = server.get("/fetch-cart/customer-1").await.json::<Value>();
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["restaurantName"], "bob");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(cart["total"], 36.0);
}

#[tokio::test]
async fn add_to_cart_errors() {
    let (server, _) = server();

    let response = server
        .post("/add-to-cart")
        .json(&json!({
            "userId": "customer-1",
            "foodItemId": "food-1",
            "restaurantId": "missing",
            "quantity": 1
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Restaurant not found");

    server
        .post("/add-to-cart")
        .json(&json!({ "userId": "customer-1", "restaurantId": "missing", "quantity": 1 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/add-to-cart")
        .json(&json!({
            "userId": "customer-1",
            "foodItemId": "food-1",
            "restaurantId": "missing",
            "quantity": 0
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
