//! Test application fixture
//!
//! Every `TestApp` owns a private in-memory SQLite database with the
//! schema applied, and drives the real router through `oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use devconnector::backend::routes::create_router;
use devconnector::backend::server::config::connect_in_memory;
use devconnector::backend::server::{build_state, AppState};
use devconnector::shared::AppConfig;

pub const TEST_SECRET: &str = "test-signing-secret";

/// Captured response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("response is not JSON ({}): {}", e, self.text))
    }
}

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(AppConfig::builder().jwt_secret(TEST_SECRET)).await
    }

    /// Point the GitHub proxy at a mock server
    pub async fn with_github(base_url: &str) -> Self {
        Self::with_config(
            AppConfig::builder()
                .jwt_secret(TEST_SECRET)
                .github_api_url(base_url)
                .github_credentials("test-client", "test-secret"),
        )
        .await
    }

    async fn with_config(builder: devconnector::shared::AppConfigBuilder) -> Self {
        let config = builder.build().expect("valid test config");
        let pool = connect_in_memory().await.expect("in-memory database");
        let state = build_state(&config, pool).expect("app state");
        let router = create_router(state.clone());
        Self { state, router }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.db_pool
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");

        TestResponse {
            status,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        self.request(Method::PUT, uri, token, body).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}
