//! Common test utilities for spotbook integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use spotbook_service::{create_router, AppState, ServiceConfig};
use spotbook_store::RocksStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
        }
    }

    /// Create a user and return its ID.
    pub async fn create_user(&self, name: &str) -> String {
        let response = self
            .server
            .post("/users/")
            .json(&json!({ "name": name, "password": "hunter2" }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("user id in response").to_string()
    }

    /// Create a cafe and return its ID.
    pub async fn create_cafe(&self, name: &str) -> String {
        let response = self
            .server
            .post("/cafes/")
            .json(&json!({
                "name": name,
                "address": {
                    "street": "123 Main St",
                    "city": "Madison",
                    "state": "WI"
                },
                "average_rating": 4.0
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("cafe id in response").to_string()
    }

    /// Create a bookmark for a (user, cafe) pair and return its ID.
    pub async fn create_bookmark(&self, user_id: &str, cafe_id: &str) -> String {
        let response = self
            .server
            .post("/bookmarks/")
            .json(&json!({ "user_id": user_id, "cafe_id": cafe_id }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["id"]
            .as_str()
            .expect("bookmark id in response")
            .to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
