use crate::models::{NewProduct, Product, ProductPatch};
use crate::services::store::ProductStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local product store.
///
/// Keeps insertion order, which is what `list` returns. Can be switched
/// unavailable to exercise the degraded paths without a real outage.
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
    available: AtomicBool,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::DatabaseError(anyhow::anyhow!(
                "in-memory product store is unavailable"
            )))
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        self.ensure_available()?;
        let product = Product::new(product);
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.ensure_available()?;
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        self.ensure_available()?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn update(
        &self,
        id: &ObjectId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, AppError> {
        self.ensure_available()?;
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == *id).map(|product| {
            product.apply(patch);
            product.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        self.ensure_available()?;
        let mut products = self.products.write().await;
        Ok(products
            .iter()
            .position(|p| p.id == *id)
            .map(|index| products.remove(index)))
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.ensure_available()?;
        Ok(self.products.read().await.len() as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_available()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
