use crate::models::{product::now_millis, NewProduct, Product, ProductPatch};
use crate::services::store::ProductStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

const PRODUCTS_COLLECTION: &str = "products";

#[derive(Clone)]
pub struct MongoProductStore {
    client: MongoClient,
    db: Database,
}

impl MongoProductStore {
    /// Create the client and ping the server once, so an unreachable
    /// database fails startup instead of the first request.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        let store = Self { client, db };
        store.health_check().await?;
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(store)
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(PRODUCTS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let product = Product::new(product);
        self.products()
            .insert_one(&product, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert product: {}", e);
                AppError::from(e)
            })?;
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self.products().find(None, None).await.map_err(|e| {
            tracing::error!("Failed to list products: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect products: {}", e);
            AppError::from(e)
        })
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        self.products()
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(product_id = %id, "Failed to find product: {}", e);
                AppError::from(e)
            })
    }

    async fn update(
        &self,
        id: &ObjectId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, AppError> {
        let mut set = doc! { "updated_at": BsonDateTime::from_chrono(now_millis()) };
        if let Some(name) = patch.name {
            set.insert("name", name);
        }
        if let Some(price) = patch.price {
            set.insert("price", price);
        }
        if let Some(category) = patch.category {
            set.insert("category", category.as_str());
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.products()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set }, options)
            .await
            .map_err(|e| {
                tracing::error!(product_id = %id, "Failed to update product: {}", e);
                AppError::from(e)
            })
    }

    async fn delete(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        self.products()
            .find_one_and_delete(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(product_id = %id, "Failed to delete product: {}", e);
                AppError::from(e)
            })
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.products()
            .count_documents(None, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {}", e);
                AppError::from(e)
            })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}
