#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use product_service::config::{
    FallbackConfig, MongoConfig, ObservabilityConfig, ProductConfig, StoreBackend, StoreConfig,
};
use product_service::services::InMemoryProductStore;
use product_service::startup::{build_router, AppState};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config(sample_fallback: bool) -> ProductConfig {
    ProductConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            fallback_port: 0,
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: format!("product_test_{}", uuid::Uuid::new_v4().simple()),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
        fallback: FallbackConfig {
            sample_products: sample_fallback,
        },
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        },
    }
}

/// Router wired to an in-memory store the test can reach into.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryProductStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_fallback(true)
    }

    pub fn with_fallback(sample_fallback: bool) -> Self {
        let store = Arc::new(InMemoryProductStore::new());
        let state = AppState {
            config: test_config(sample_fallback),
            store: store.clone(),
        };

        TestApp {
            router: build_router(state),
            store,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|b| b.to_string());
        self.raw_request(method, uri, body).await
    }

    pub async fn raw_request(
        &self,
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    /// Create a product through the API and return its id.
    pub async fn create(&self, body: Value) -> String {
        let (status, json) = self.post("/products", body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
        json["data"]["id"].as_str().unwrap().to_string()
    }
}
