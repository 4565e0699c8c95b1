//! Authentication test helpers
//!
//! Register users and log them in through the HTTP API.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

/// Registered and logged-in user
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Registration body for `name`
pub fn registration_body(name: &str) -> Value {
    json!({
        "username": name,
        "email": format!("{name}@example.com"),
        "password": TEST_PASSWORD,
        "fullName": format!("{name} tester"),
    })
}

/// Register `name` and return the created user JSON
pub async fn register(server: &TestServer, name: &str) -> Value {
    let response = server.post("/auth/register").json(&registration_body(name)).await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json()
}

/// Log in and return the access token
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    let body: Value = response.json();
    body["access_token"]
        .as_str()
        .expect("login response without access_token")
        .to_string()
}

/// Register `name`, log in and return both identity and token
pub async fn create_test_user(server: &TestServer, name: &str) -> TestUser {
    let user = register(server, name).await;
    let email = format!("{name}@example.com");
    let token = login(server, &email, TEST_PASSWORD).await;
    TestUser {
        id: user["id"].as_str().and_then(|id| Uuid::parse_str(id).ok()).expect("user id"),
        username: name.to_string(),
        email,
        token,
    }
}

/// Create a post as `user` and return its JSON
pub async fn create_post(server: &TestServer, user: &TestUser, title: &str) -> Value {
    let response = server
        .post("/posts")
        .authorization_bearer(&user.token)
        .json(&json!({
            "title": title,
            "content": "Some content that is long enough",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json()
}

/// Comment on a post as `user` and return the comment JSON
pub async fn create_comment(server: &TestServer, user: &TestUser, post_id: &str, content: &str) -> Value {
    let response = server
        .post(&format!("/posts/{post_id}/comments"))
        .authorization_bearer(&user.token)
        .json(&json!({ "content": content }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json()
}
