//! Shared helpers for API tests

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use wavv_travel::{Config, create_app};

pub const ADMIN_EMAIL: &str = "admin@wavv.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub async fn create_test_server_with_config(config: Config) -> TestServer {
    let app = create_app(config).await.expect("Failed to create app");
    TestServer::new(app).expect("Failed to create test server")
}

/// Fresh in-memory store with the seeded admin
pub async fn create_test_server() -> TestServer {
    create_test_server_with_config(Config::for_tests()).await
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

pub async fn admin_token(server: &TestServer) -> String {
    login(server, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Register a customer, returning (token, user id)
pub async fn register(server: &TestServer, name: &str, email: &str) -> (String, i64) {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "name": name, "email": email, "password": "secret123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    (
        body["token"].as_str().expect("token").to_string(),
        body["user"]["id"].as_i64().expect("user id"),
    )
}

pub async fn create_package(server: &TestServer, admin: &str, title: &str, price: f64) -> i64 {
    let response = server
        .post("/api/packages")
        .authorization_bearer(admin)
        .json(&json!({
            "title": title,
            "destination": "Portugal",
            "description": "Coastal towns, fresh seafood and long walks by the Atlantic.",
            "price": price,
            "duration": "5 days",
            "image_url": "/uploads/portugal.jpg"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["package"]["id"]
        .as_i64()
        .expect("package id")
}

pub fn future_date() -> String {
    (Utc::now().date_naive() + Duration::days(30))
        .format("%Y-%m-%d")
        .to_string()
}

/// Book `package_id` for `token`, returning the booking body
pub async fn book(server: &TestServer, token: &str, package_id: i64, guests: i64, rooms: i64) -> Value {
    let response = server
        .post("/api/bookings")
        .authorization_bearer(token)
        .json(&json!({
            "packageId": package_id,
            "bookingDate": future_date(),
            "guests": guests,
            "rooms": rooms
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["booking"].clone()
}
