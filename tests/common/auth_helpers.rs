//! Authentication test helpers

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::database::TestApp;

/// A registered user and the token issued at registration
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Register through the API and resolve the new user's id
pub async fn register_user(app: &TestApp, name: &str, email: &str, password: &str) -> TestUser {
    let response = app
        .post("/api/users", None, json!({ "name": name, "email": email, "password": password }))
        .await;
    assert_eq!(response.status, StatusCode::OK, "register failed: {}", response.text);

    let token = response.json()["token"]
        .as_str()
        .expect("token in response")
        .to_string();
    let id = app.state.tokens.verify(Some(&token)).expect("issued token verifies");

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        token,
    }
}

/// Register a user with a unique email
pub async fn register_unique_user(app: &TestApp, name: &str) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4().simple());
    register_user(app, name, &email, "secret1").await
}

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs()
}
