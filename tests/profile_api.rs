//! Profile endpoints, driven through the router

#[macro_use]
mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{register_unique_user, TestApp, TestUser};

async fn create_profile(app: &TestApp, user: &TestUser) -> serde_json::Value {
    let response = app
        .post(
            "/api/profile",
            Some(&user.token),
            json!({
                "status": "Developer",
                "skills": "Rust, SQL ,  axum",
                "company": "Acme",
                "githubusername": "octocat",
                "twitter": "https://twitter.com/dev",
                "youtube": ""
            }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_me_without_profile() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;

    let response = app.get("/api/profile/me", Some(&user.token)).await;
    assert_msg!(response, StatusCode::BAD_REQUEST, "There is no profile for this user");
}

#[tokio::test]
async fn test_create_and_read_profile() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;

    let profile = create_profile(&app, &user).await;
    assert_eq!(profile["skills"], json!(["Rust", "SQL", "axum"]));
    assert_eq!(profile["social"], json!({ "twitter": "https://twitter.com/dev" }));
    assert_eq!(profile["user"]["id"], user.id.to_string());
    assert_eq!(profile["user"]["name"], "Dev");
    assert!(profile["user"].get("email").is_none());

    let me = app.get("/api/profile/me", Some(&user.token)).await;
    assert_status!(me, StatusCode::OK);
    assert_eq!(me.json(), profile);

    let by_user = app.get(&format!("/api/profile/user/{}", user.id), None).await;
    assert_status!(by_user, StatusCode::OK);
    assert_eq!(by_user.json(), profile);

    let all = app.get("/api/profile", None).await;
    assert_eq!(all.json(), json!([profile]));
}

#[tokio::test]
async fn test_update_keeps_unsent_fields() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;
    let created = create_profile(&app, &user).await;

    let response = app
        .post(
            "/api/profile",
            Some(&user.token),
            json!({ "status": "Lead", "skills": "Go" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);

    let updated = response.json();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["status"], "Lead");
    assert_eq!(updated["skills"], json!(["Go"]));
    assert_eq!(updated["company"], "Acme");
    assert_eq!(updated["social"], json!({}));
}

#[tokio::test]
async fn test_profile_requires_status_and_skills() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;

    let response = app.post("/api/profile", Some(&user.token), json!({})).await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "errors": [
            { "msg": "Status is required", "param": "status" },
            { "msg": "Skills are required", "param": "skills" }
        ]})
    );
}

#[tokio::test]
async fn test_profile_rejects_blank_skill_list() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;

    let response = app
        .post("/api/profile", Some(&user.token), json!({ "status": "Dev", "skills": " , " }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "errors": [{ "msg": "Skills are required", "param": "skills" }] })
    );
}

#[tokio::test]
async fn test_profile_for_deleted_account() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;

    let deleted = app.delete("/api/profile", Some(&user.token)).await;
    assert_status!(deleted, StatusCode::OK);

    let response = app
        .post("/api/profile", Some(&user.token), json!({ "status": "Dev", "skills": "Rust" }))
        .await;
    assert_msg!(response, StatusCode::NOT_FOUND, "User not found");

    let all = app.get("/api/profile", None).await;
    assert_eq!(all.json(), json!([]));
}

#[tokio::test]
async fn test_profile_by_unknown_or_malformed_user() {
    let app = TestApp::new().await;

    let unknown = app.get(&format!("/api/profile/user/{}", uuid::Uuid::new_v4()), None).await;
    assert_msg!(unknown, StatusCode::BAD_REQUEST, "Profile not found");

    let malformed = app.get("/api/profile/user/5d7a514b", None).await;
    assert_msg!(malformed, StatusCode::BAD_REQUEST, "Profile not found");
}

#[tokio::test]
async fn test_experience_and_education() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;
    create_profile(&app, &user).await;

    let first = app
        .put(
            "/api/profile/experience",
            Some(&user.token),
            Some(json!({ "title": "Junior", "company": "Acme", "from": "2015-01-01", "to": "2017-12-31" })),
        )
        .await;
    assert_status!(first, StatusCode::OK);

    let second = app
        .put(
            "/api/profile/experience",
            Some(&user.token),
            Some(json!({ "title": "Senior", "company": "Acme", "from": "2018-01-01", "current": true })),
        )
        .await;
    let profile = second.json();
    assert_eq!(profile["experience"][0]["title"], "Senior");
    assert_eq!(profile["experience"][1]["title"], "Junior");
    assert_eq!(profile["experience"][1]["to"], "2017-12-31");

    let junior_id = profile["experience"][1]["id"].as_str().unwrap().to_string();
    let response = app
        .delete(&format!("/api/profile/experience/{junior_id}"), Some(&user.token))
        .await;
    assert_status!(response, StatusCode::OK);
    let remaining: Vec<_> = response.json()["experience"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(remaining, vec!["Senior".to_string()]);

    let again = app
        .delete(&format!("/api/profile/experience/{junior_id}"), Some(&user.token))
        .await;
    assert_msg!(again, StatusCode::NOT_FOUND, "Experience not found");

    let education = app
        .put(
            "/api/profile/education",
            Some(&user.token),
            Some(json!({ "school": "MIT", "degree": "BSc", "fieldofstudy": "CS", "from": "2010-09-01" })),
        )
        .await;
    assert_status!(education, StatusCode::OK);
    let edu_id = education.json()["education"][0]["id"].as_str().unwrap().to_string();

    let removed = app
        .delete(&format!("/api/profile/education/{edu_id}"), Some(&user.token))
        .await;
    assert_status!(removed, StatusCode::OK);
    assert_eq!(removed.json()["education"], json!([]));

    let again = app
        .delete(&format!("/api/profile/education/{edu_id}"), Some(&user.token))
        .await;
    assert_msg!(again, StatusCode::NOT_FOUND, "Education not found");

    let malformed = app.delete("/api/profile/education/not-an-id", Some(&user.token)).await;
    assert_msg!(malformed, StatusCode::NOT_FOUND, "Education not found");
}

#[tokio::test]
async fn test_experience_validation() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;
    create_profile(&app, &user).await;

    let response = app
        .put("/api/profile/experience", Some(&user.token), Some(json!({ "company": "Acme" })))
        .await;
    assert_first_error!(response, "Title is required");
    assert_eq!(response.json()["errors"][1]["msg"], "From date is required");
}

#[tokio::test]
async fn test_experience_without_profile() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;

    let response = app
        .put(
            "/api/profile/experience",
            Some(&user.token),
            Some(json!({ "title": "Dev", "company": "Acme", "from": "2015-01-01" })),
        )
        .await;
    assert_msg!(response, StatusCode::BAD_REQUEST, "There is no profile for this user");
}

#[tokio::test]
async fn test_delete_account() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app, "Dev").await;
    let other = register_unique_user(&app, "Other").await;
    create_profile(&app, &user).await;

    let post = app.post("/api/posts", Some(&user.token), json!({ "text": "bye" })).await;
    assert_status!(post, StatusCode::OK);
    let other_post = app.post("/api/posts", Some(&other.token), json!({ "text": "stay" })).await;
    assert_status!(other_post, StatusCode::OK);

    let response = app.delete("/api/profile", Some(&user.token)).await;
    assert_msg!(response, StatusCode::OK, "User deleted");

    // The token still verifies, but its user is gone
    let me = app.get("/api/auth", Some(&user.token)).await;
    assert_status!(me, StatusCode::NOT_FOUND);

    let posts = app.get("/api/posts", Some(&other.token)).await.json();
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["text"], "stay");

    let login = app
        .post("/api/auth", None, json!({ "email": user.email, "password": user.password }))
        .await;
    assert_first_error!(login, "Invalid Credentials");
}
