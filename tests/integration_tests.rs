//! End-to-end API tests against an in-memory store

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::*;

#[tokio::test]
async fn test_server_startup_and_health() {
    let server = create_test_server().await;
    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_register_login_profile() {
    let server = create_test_server().await;
    let (_, user_id) = register(&server, "Maya Lind", "Maya@Example.com").await;

    let token = login(&server, "maya@example.com", "secret123").await;
    let response = server
        .get("/api/auth/profile")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["name"], "Maya Lind");
    assert_eq!(body["user"]["email"], "maya@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let server = create_test_server().await;
    register(&server, "Maya Lind", "maya@example.com").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "name": "Other Maya", "email": "maya@example.com", "password": "secret123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "User with this email already exists"
    );
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let server = create_test_server().await;
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": "not-the-password" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_change_password_flow() {
    let server = create_test_server().await;
    let (token, _) = register(&server, "Ivo Marsh", "ivo@example.com").await;

    let response = server
        .put("/api/auth/change-password")
        .authorization_bearer(&token)
        .json(&json!({ "currentPassword": "wrong-one", "newPassword": "fresh-secret" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .put("/api/auth/change-password")
        .authorization_bearer(&token)
        .json(&json!({ "currentPassword": "secret123", "newPassword": "fresh-secret" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    login(&server, "ivo@example.com", "fresh-secret").await;
}

#[tokio::test]
async fn test_booking_total_is_price_times_party() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    let (token, _) = register(&server, "Ana Ruiz", "ana@example.com").await;

    let booking = book(&server, &token, package_id, 2, 1).await;
    assert_eq!(booking["total_amount"].as_f64(), Some(200.0));
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["package_title"], "Lisbon Escape");

    // A later price change leaves the booking untouched
    let response = server
        .put(&format!("/api/packages/{}", package_id))
        .authorization_bearer(&admin)
        .json(&json!({
            "title": "Lisbon Escape",
            "destination": "Portugal",
            "description": "Coastal towns, fresh seafood and long walks by the Atlantic.",
            "price": 150.0,
            "duration": "5 days"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get(&format!("/api/bookings/{}", booking["id"]))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>()["booking"]["total_amount"].as_f64(),
        Some(200.0)
    );
}

#[tokio::test]
async fn test_booking_validation() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    let (token, _) = register(&server, "Ana Ruiz", "ana@example.com").await;

    let response = server
        .post("/api/bookings")
        .authorization_bearer(&token)
        .json(&json!({
            "packageId": package_id,
            "bookingDate": future_date(),
            "guests": 11,
            "rooms": 1
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Number of guests must be between 1 and 10"
    );

    let response = server
        .post("/api/bookings")
        .authorization_bearer(&token)
        .json(&json!({
            "packageId": package_id,
            "bookingDate": "2001-01-01",
            "guests": 1,
            "rooms": 1
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/bookings")
        .authorization_bearer(&token)
        .json(&json!({
            "packageId": 9999,
            "bookingDate": future_date(),
            "guests": 1,
            "rooms": 1
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_accepts_loose_field_formats() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Porto Weekend", 150.0).await;
    let (token, _) = register(&server, "Rui Costa", "rui@example.com").await;

    let response = server
        .post("/api/bookings")
        .authorization_bearer(&token)
        .json(&json!({
            "packageId": package_id.to_string(),
            "bookingDate": format!("{}T00:00:00Z", future_date()),
            "guests": "2",
            "rooms": 1
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let booking = response.json::<Value>()["booking"].clone();
    assert_eq!(booking["guests"], 2);
    assert_eq!(booking["total_amount"].as_f64(), Some(300.0));

    let response = server
        .post("/api/bookings")
        .authorization_bearer(&token)
        .json(&json!({
            "packageId": package_id,
            "bookingDate": "someday",
            "guests": 1,
            "rooms": 1
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Booking date must be a valid date"
    );

    let response = server
        .post("/api/bookings")
        .authorization_bearer(&token)
        .json(&json!({
            "packageId": package_id,
            "bookingDate": future_date(),
            "guests": "two",
            "rooms": 1
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Number of guests must be between 1 and 10"
    );
}

#[tokio::test]
async fn test_status_changes_follow_role_rules() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    let (token, _) = register(&server, "Ana Ruiz", "ana@example.com").await;
    let booking = book(&server, &token, package_id, 1, 1).await;
    let status_uri = format!("/api/bookings/{}/status", booking["id"]);

    let response = server
        .patch(&status_uri)
        .authorization_bearer(&token)
        .json(&json!({ "status": "confirmed" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .patch(&status_uri)
        .authorization_bearer(&admin)
        .json(&json!({ "status": "confirmed" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["booking"]["status"], "confirmed");

    let response = server
        .patch(&status_uri)
        .authorization_bearer(&admin)
        .json(&json!({ "status": "shipped" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let cancel_uri = format!("/api/bookings/{}/cancel", booking["id"]);
    let response = server.post(&cancel_uri).authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["booking"]["status"], "cancelled");

    let response = server.post(&cancel_uri).authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bookings_are_private_to_their_owner() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    let (owner, _) = register(&server, "Ana Ruiz", "ana@example.com").await;
    let (stranger, _) = register(&server, "Bo Stone", "bo@example.com").await;
    let booking = book(&server, &owner, package_id, 1, 1).await;
    let uri = format!("/api/bookings/{}", booking["id"]);

    let response = server.get(&uri).authorization_bearer(&stranger).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.get(&uri).authorization_bearer(&admin).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get("/api/bookings/my-bookings")
        .authorization_bearer(&stranger)
        .await;
    let body: Value = response.json();
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["pagination"]["total"], 0);

    let response = server
        .get("/api/bookings/my-bookings")
        .add_query_param("status", "pending")
        .authorization_bearer(&owner)
        .await;
    let body: Value = response.json();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["pages"], 1);
}

#[tokio::test]
async fn test_review_requires_confirmed_booking_and_updates_rating() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    let (token, _) = register(&server, "Ana Ruiz", "ana@example.com").await;
    let review = json!({
        "packageId": package_id,
        "rating": 4,
        "comment": "Lovely trip, great guides and food."
    });

    let response = server
        .post("/api/reviews")
        .authorization_bearer(&token)
        .json(&review)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let booking = book(&server, &token, package_id, 1, 1).await;
    server
        .patch(&format!("/api/bookings/{}/status", booking["id"]))
        .authorization_bearer(&admin)
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/reviews")
        .authorization_bearer(&token)
        .json(&review)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let review_id = response.json::<Value>()["review"]["id"].clone();

    let response = server
        .post("/api/reviews")
        .authorization_bearer(&token)
        .json(&review)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let package: Value = server
        .get(&format!("/api/packages/{}", package_id))
        .await
        .json();
    assert_eq!(package["package"]["rating"].as_f64(), Some(4.0));
    assert_eq!(package["package"]["total_reviews"], 1);
    assert_eq!(package["package"]["reviews"][0]["user_name"], "Ana Ruiz");

    server
        .put(&format!("/api/reviews/{}", review_id))
        .authorization_bearer(&token)
        .json(&json!({ "rating": 2 }))
        .await
        .assert_status_ok();

    let reviews: Value = server
        .get(&format!("/api/reviews/package/{}", package_id))
        .await
        .json();
    assert_eq!(reviews["average_rating"].as_f64(), Some(2.0));
    assert_eq!(reviews["total_reviews"], 1);

    server
        .delete(&format!("/api/reviews/{}", review_id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let package: Value = server
        .get(&format!("/api/packages/{}", package_id))
        .await
        .json();
    assert_eq!(package["package"]["rating"].as_f64(), Some(0.0));
    assert_eq!(package["package"]["total_reviews"], 0);
}

#[tokio::test]
async fn test_package_with_booking_cannot_be_deleted() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    let (token, _) = register(&server, "Ana Ruiz", "ana@example.com").await;
    book(&server, &token, package_id, 1, 1).await;

    let response = server
        .delete(&format!("/api/packages/{}", package_id))
        .authorization_bearer(&admin)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Cannot delete package with existing bookings"
    );

    server
        .get(&format!("/api/packages/{}", package_id))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_package_search_and_pagination() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    create_package(&server, &admin, "Porto Wine Trail", 400.0).await;
    create_package(&server, &admin, "Algarve Sun", 900.0).await;

    let body: Value = server
        .get("/api/packages")
        .add_query_param("maxPrice", 500)
        .await
        .json();
    assert_eq!(body["pagination"]["total"], 2);

    let body: Value = server
        .get("/api/packages")
        .add_query_param("search", "wine")
        .await
        .json();
    assert_eq!(body["items"][0]["title"], "Porto Wine Trail");

    let body: Value = server
        .get("/api/packages")
        .add_query_param("limit", 2)
        .add_query_param("page", 2)
        .await
        .json();
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["pagination"]["pages"], 2);

    let response = server.get("/api/packages").add_query_param("limit", 0).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.get("/api/packages/popular/0").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = server.get("/api/packages/by-destination/portu").await.json();
    assert_eq!(body["items"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_customer_cannot_manage_packages() {
    let server = create_test_server().await;
    let (token, _) = register(&server, "Ana Ruiz", "ana@example.com").await;

    let response = server
        .post("/api/packages")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Sneaky Trip",
            "destination": "Nowhere",
            "description": "Should never be stored in the catalogue.",
            "price": 1.0,
            "duration": "1 day"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let (token, user_id) = register(&server, "Ana Ruiz", "ana@example.com").await;

    server
        .delete(&format!("/api/admin/users/{}", user_id))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();

    let response = server
        .get("/api/auth/profile")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_user_management() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let (_, user_id) = register(&server, "Ana Ruiz", "ana@example.com").await;

    let body: Value = server
        .get("/api/admin/users")
        .add_query_param("search", "ana")
        .authorization_bearer(&admin)
        .await
        .json();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["items"][0]["total_bookings"], 0);

    let response = server
        .patch(&format!("/api/admin/users/{}/role", user_id))
        .authorization_bearer(&admin)
        .json(&json!({ "role": "superuser" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    server
        .patch(&format!("/api/admin/users/{}/role", user_id))
        .authorization_bearer(&admin)
        .json(&json!({ "role": "admin" }))
        .await
        .assert_status_ok();

    let response = server
        .delete(&format!("/api/admin/users/{}", user_id))
        .authorization_bearer(&admin)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_dashboard_and_booking_list() {
    let server = create_test_server().await;
    let admin = admin_token(&server).await;
    let package_id = create_package(&server, &admin, "Lisbon Escape", 100.0).await;
    let (token, user_id) = register(&server, "Ana Ruiz", "ana@example.com").await;
    let booking = book(&server, &token, package_id, 2, 2).await;

    server
        .patch(&format!("/api/admin/bookings/{}/status", booking["id"]))
        .authorization_bearer(&admin)
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_ok();

    let body: Value = server
        .get("/api/admin/bookings")
        .add_query_param("userId", user_id)
        .authorization_bearer(&admin)
        .await
        .json();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["items"][0]["user_email"], "ana@example.com");

    let body: Value = server
        .get("/api/admin/dashboard")
        .authorization_bearer(&admin)
        .await
        .json();
    assert_eq!(body["stats"]["total_users"], 1);
    assert_eq!(body["stats"]["total_packages"], 1);
    assert_eq!(body["stats"]["total_bookings"], 1);
    assert_eq!(body["stats"]["total_revenue"].as_f64(), Some(400.0));
    assert_eq!(body["status_distribution"][0]["status"], "confirmed");

    let stats: Value = server
        .get("/api/bookings/stats/user")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(stats["stats"]["confirmed_bookings"], 1);
    assert_eq!(stats["stats"]["total_spent"].as_f64(), Some(400.0));

    server
        .delete(&format!("/api/admin/bookings/{}", booking["id"]))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_booking_contact_lifecycle() {
    let server = create_test_server().await;

    let response = server
        .post("/api/bookings/contacts")
        .json(&json!({ "name": "Lead", "email": "lead@example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "All fields (name, email, phone, booking_date) are required."
    );

    let response = server
        .post("/api/bookings/contacts")
        .json(&json!({
            "name": "Lead Person",
            "email": "lead@example.com",
            "phone": "+351 912 345 678",
            "booking_date": future_date()
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let id = response.json::<Value>()["contact"]["id"].clone();

    let body: Value = server.get("/api/bookings/contacts/all").await.json();
    assert_eq!(body["items"][0]["status"], "pending");

    server
        .patch(&format!("/api/bookings/contacts/{}/status", id))
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/api/bookings/contacts/{}", id))
        .await
        .assert_status_ok();

    let response = server
        .delete(&format!("/api/bookings/contacts/{}", id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_form_is_acknowledged() {
    let server = create_test_server().await;

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": "Rui Costa",
            "email": "rui@example.com",
            "subject": "Group discount",
            "message": "Do you offer discounts for groups of eight?"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["success"], true);

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": "Rui Costa",
            "email": "rui@example.com",
            "subject": "Hi",
            "message": "Do you offer discounts for groups of eight?"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Subject must be between 5 and 100 characters"
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let server = create_test_server().await;
    let response = server.get("/api/does-not-exist").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Route not found");
}
