use crate::models::{NewProduct, Product, ProductPatch};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence boundary for products.
///
/// Inputs are the validated `NewProduct` / `ProductPatch` types, so an
/// implementation never has to re-check field rules. Every call touches at
/// most one document and is atomic at that granularity.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError>;

    /// All products in the backend's natural order.
    async fn list(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError>;

    /// Applies `patch` and returns the document as it is after the update.
    async fn update(&self, id: &ObjectId, patch: ProductPatch)
        -> Result<Option<Product>, AppError>;

    /// Removes the document and returns its last content.
    async fn delete(&self, id: &ObjectId) -> Result<Option<Product>, AppError>;

    async fn count(&self) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Parse a path id. Anything that is not an ObjectId cannot name a stored
/// product, so it is reported the same way as a missing one.
pub fn parse_product_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| {
        tracing::debug!(product_id = %id, "Malformed product id");
        product_not_found()
    })
}

pub fn product_not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Product not found"))
}
