//! Application startup and lifecycle management.

use crate::config::{ProductConfig, StoreBackend};
use crate::handlers;
use crate::services::{InMemoryProductStore, MongoProductStore, ProductStore};
use axum::{middleware, routing::get, Router};
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ProductConfig,
    pub store: Arc<dyn ProductStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::api_info))
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Open the configured store backend. Failure here is fatal for the process.
pub async fn connect_store(config: &ProductConfig) -> Result<Arc<dyn ProductStore>, AppError> {
    match config.store.backend {
        StoreBackend::Mongodb => {
            let store = MongoProductStore::connect(&config.mongodb.uri, &config.mongodb.database)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to MongoDB: {}", e);
                    e
                })?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory product store; data is lost on restart");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
    }
}

/// Bind the listen port, retrying once on the fallback port when the
/// primary one is already taken.
pub async fn bind_listener(config: &core_config::Config) -> Result<TcpListener, AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            let Some(fallback_port) = config.fallback_port() else {
                tracing::error!("Port {} is in use and no fallback port is set", config.port);
                return Err(AppError::from(e));
            };
            tracing::warn!(
                "Port {} is in use, trying fallback port {}",
                config.port,
                fallback_port
            );
            let fallback_addr = SocketAddr::from(([0, 0, 0, 0], fallback_port));
            TcpListener::bind(fallback_addr).await.map_err(|e| {
                tracing::error!("Failed to bind TCP listener to {}: {}", fallback_addr, e);
                AppError::from(e)
            })
        }
        Err(e) => {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            Err(AppError::from(e))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, connecting to the configured store.
    pub async fn build(config: ProductConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::build_with_store(config, store).await
    }

    /// Build the application around an already constructed store.
    pub async fn build_with_store(
        config: ProductConfig,
        store: Arc<dyn ProductStore>,
    ) -> Result<Self, AppError> {
        let listener = bind_listener(&config.common).await?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            store = store.backend(),
            sample_fallback = config.fallback.sample_products,
            "Product service listening on port {}",
            port
        );

        Ok(Self {
            port,
            listener,
            state: AppState { config, store },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> Arc<dyn ProductStore> {
        self.state.store.clone()
    }

    /// Serve requests until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
