//! Common test utilities for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use roster_server::store::MemoryPlayerStore;
use roster_server::{AppState, Config, routes};
use roster_test_utils::TestPlayer;
use serde_json::Value;
use tower::ServiceExt;

/// Test application over an in-memory player store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryPlayerStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryPlayerStore::new());
        let state = AppState::with_store(&Config::in_memory(), store.clone());
        let router = routes::app(state.clone());
        Self {
            router,
            state,
            store,
        }
    }

    /// Send a request to the app.
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.request(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response<Body> {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> Response<Body> {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Create a player through the API and return its JSON.
    pub async fn create(&self, player: &TestPlayer) -> Value {
        let response = self.post_json("/rest/players", &player.to_json()).await;
        assert_eq!(response.status(), StatusCode::OK);
        response_json(response).await
    }
}

/// Read a response body as a string.
pub async fn response_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn response_json(response: Response<Body>) -> Value {
    serde_json::from_str(&response_text(response).await).unwrap()
}
