use crate::dtos::{ApiInfoResponse, DataSource, ProductResponse};
use crate::models::Category;
use crate::services::{record_fallback, sample_products};
use crate::startup::AppState;
use axum::{extract::State, Json};
use std::collections::BTreeMap;

fn endpoints() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("GET /", "API info with products (this page)"),
        ("POST /products", "Create product"),
        ("GET /products", "Get all products"),
        ("GET /products/:id", "Get single product"),
        ("PUT /products/:id", "Update product"),
        ("DELETE /products/:id", "Delete product"),
        ("GET /health", "Liveness probe"),
        ("GET /ready", "Readiness probe"),
        ("GET /metrics", "Prometheus metrics"),
    ])
}

/// Service overview. Always answers 200; an unreachable store is reported
/// through `databaseConnected` and `degraded` rather than an error status.
#[tracing::instrument(skip(state))]
pub async fn api_info(State(state): State<AppState>) -> Json<ApiInfoResponse> {
    let database_connected = state.store.health_check().await.is_ok();
    let fallback_enabled = state.config.fallback.sample_products;

    let (products, source, degraded) = match state.store.list().await {
        Ok(products) if !products.is_empty() => (
            products.into_iter().map(ProductResponse::from).collect(),
            DataSource::Store,
            false,
        ),
        // An empty catalogue is a normal state; the samples just give the
        // overview something to show.
        Ok(_) if fallback_enabled => (sample_products(), DataSource::Sample, false),
        Ok(_) => (Vec::new(), DataSource::Store, false),
        Err(e) => {
            tracing::warn!(
                error = %e,
                store = state.store.backend(),
                fallback_enabled,
                "Product store unavailable while building API info (degraded mode)"
            );
            if fallback_enabled {
                record_fallback("info");
                (sample_products(), DataSource::Sample, true)
            } else {
                (Vec::new(), DataSource::Store, true)
            }
        }
    };

    Json(ApiInfoResponse {
        message: "Product CRUD API is running".to_string(),
        status: "Server is active".to_string(),
        database: if database_connected {
            "connected".to_string()
        } else {
            "disconnected".to_string()
        },
        database_connected,
        degraded,
        source,
        total_products: products.len(),
        products,
        categories: Category::ALL.to_vec(),
        endpoints: endpoints(),
    })
}
