use product_service::config::ProductConfig;
use product_service::services::init_metrics;
use product_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let config = ProductConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "product-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start product-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
