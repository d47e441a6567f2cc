//! Integration tests for the admin user endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;
use shop_entity::user::UserRole;

use helpers::TestApp;

async fn admin_app() -> (TestApp, String) {
    let app = TestApp::new();
    app.create_test_user("admin@shop.test", "root-pw", UserRole::Admin).await;
    let token = app.login("admin@shop.test", "root-pw").await;
    (app, token)
}

fn new_user_body(email: &str, role: &str) -> serde_json::Value {
    json!({
        "name": "Bob",
        "email": email,
        "password": "bob-pw",
        "role": role,
        "shipping_address": { "city": "Bangkok", "country": "TH" }
    })
}

#[tokio::test]
async fn test_user_role_is_forbidden() {
    let app = TestApp::new();
    app.create_test_user("alice@shop.test", "p1", UserRole::User).await;
    let token = app.login("alice@shop.test", "p1").await;

    let response = app.request("GET", "/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_list_and_login_as_new_user() {
    let (app, token) = admin_app().await;

    let created = app
        .request("POST", "/users", Some(new_user_body("bob@shop.test", "user")), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    assert_eq!(created.body["data"]["shipping_address"]["city"], "Bangkok");

    let listed = app.request("GET", "/users?search=BOB", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let users = listed.body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "bob@shop.test");

    let bob = app.login("bob@shop.test", "bob-pw").await;
    assert!(!bob.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let (app, token) = admin_app().await;
    let body = new_user_body("bob@shop.test", "user");

    let first = app.request("POST", "/users", Some(body.clone()), Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.request("POST", "/users", Some(body), Some(&token)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["message"], "Email already in use");
}

#[tokio::test]
async fn test_invalid_role_and_email_are_rejected() {
    let (app, token) = admin_app().await;

    let bad_role = app
        .request("POST", "/users", Some(new_user_body("c@shop.test", "root")), Some(&token))
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_role.body["error"], "VALIDATION_ERROR");

    let bad_email = app
        .request("POST", "/users", Some(new_user_body("not-an-email", "user")), Some(&token))
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unparsable_dates_are_ignored() {
    let (app, token) = admin_app().await;

    let response = app
        .request("GET", "/users?startDate=yesterday&endDate=2099-01-01", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rename_and_delete() {
    let (app, token) = admin_app().await;
    let id = app.create_test_user("bob@shop.test", "bob-pw", UserRole::User).await;

    let renamed = app
        .request("PUT", &format!("/users/{id}"), Some(json!({ "name": "Robert" })), Some(&token))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);

    let listed = app.request("GET", "/users?search=robert", None, Some(&token)).await;
    assert_eq!(listed.body["data"][0]["id"], id.to_string());

    let deleted = app.request("DELETE", &format!("/users/{id}"), None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app.request("DELETE", &format!("/users/{id}"), None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let (app, token) = admin_app().await;

    let response = app.request("DELETE", "/users/not-a-uuid", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid user id");
}

#[tokio::test]
async fn test_deleted_user_token_is_unauthorized() {
    let (app, admin_token) = admin_app().await;
    let id = app.create_test_user("bob@shop.test", "bob-pw", UserRole::User).await;
    let bob_token = app.login("bob@shop.test", "bob-pw").await;

    app.request("DELETE", &format!("/users/{id}"), None, Some(&admin_token)).await;

    let me = app.request("GET", "/auth/me", None, Some(&bob_token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}
