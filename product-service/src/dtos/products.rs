use crate::models::{Category, NewProduct, Product, ProductPatch};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use service_core::error::AppError;
use std::collections::BTreeMap;
use validator::Validate;

/// Body of `POST /products`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Product name is required"),
        length(
            min = 3,
            max = 100,
            message = "Product name must be between 3 and 100 characters"
        )
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Product price is required"),
        range(min = 1.0, message = "Price must be at least 1")
    )]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl CreateProductRequest {
    /// Convert an already validated request into the store's input type.
    pub fn into_new_product(self) -> Result<NewProduct, AppError> {
        match (self.name, self.price) {
            (Some(name), Some(price)) => Ok(NewProduct {
                name,
                price,
                category: self.category.unwrap_or_default(),
            }),
            _ => Err(AppError::BadRequest(anyhow::anyhow!(
                "name and price are required"
            ))),
        }
    }
}

/// Body of `PUT /products/:id`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Product name must be between 3 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(range(min = 1.0, message = "Price must be at least 1"))]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            price: req.price,
            category: req.category,
        }
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// Whole-number prices go out as JSON integers so `1200` round-trips as `1200`.
fn serialize_price<S>(price: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            price: product.price,
            category: product.category,
            created_at: Some(product.created_at.to_rfc3339()),
            updated_at: Some(product.updated_at.to_rfc3339()),
        }
    }
}

/// Where a product listing came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Store,
    Sample,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
    pub success: bool,
    pub count: usize,
    pub source: DataSource,
    pub degraded: bool,
    pub data: Vec<ProductResponse>,
}

impl ListProductsResponse {
    pub fn from_store(products: Vec<Product>) -> Self {
        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
        Self {
            success: true,
            count: data.len(),
            source: DataSource::Store,
            degraded: false,
            data,
        }
    }

    /// Listing served from the sample set because the store failed.
    pub fn degraded(samples: Vec<ProductResponse>) -> Self {
        Self {
            success: true,
            count: samples.len(),
            source: DataSource::Sample,
            degraded: true,
            data: samples,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub success: bool,
    pub message: String,
    pub data: ProductResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfoResponse {
    pub message: String,
    pub status: String,
    pub database: String,
    pub database_connected: bool,
    pub degraded: bool,
    pub source: DataSource,
    pub total_products: usize,
    pub products: Vec<ProductResponse>,
    pub categories: Vec<Category>,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}
