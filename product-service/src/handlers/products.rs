use crate::dtos::{
    CreateProductRequest, DataResponse, DeleteProductResponse, ListProductsResponse,
    ProductResponse, UpdateProductRequest,
};
use crate::services::{
    parse_product_id, product_not_found, record_fallback, record_operation, sample_products,
};
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// Tags the operation counter with the outcome of a store call.
fn observe<T>(operation: &str, result: &Result<Option<T>, AppError>) {
    let outcome = match result {
        Ok(Some(_)) => "ok",
        Ok(None) => "not_found",
        Err(_) => "error",
    };
    record_operation(operation, outcome);
}

#[tracing::instrument(skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_product = body.into_new_product()?;

    let product = state.store.insert(new_product).await.map_err(|e| {
        record_operation("create", "error");
        e
    })?;
    record_operation("create", "ok");

    tracing::info!(product_id = %product.id, name = %product.name, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ProductResponse::from(product))),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ListProductsResponse>, AppError> {
    match state.store.list().await {
        Ok(products) => {
            record_operation("list", "ok");
            Ok(Json(ListProductsResponse::from_store(products)))
        }
        Err(e) if state.config.fallback.sample_products => {
            record_operation("list", "error");
            record_fallback("list");
            tracing::warn!(
                error = %e,
                store = state.store.backend(),
                "Product store unavailable, serving sample products (degraded mode)"
            );
            Ok(Json(ListProductsResponse::degraded(sample_products())))
        }
        Err(e) => {
            record_operation("list", "error");
            Err(e)
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<DataResponse<ProductResponse>>, AppError> {
    let id = parse_product_id(&product_id)?;

    let result = state.store.find_by_id(&id).await;
    observe("get", &result);

    let product = result?.ok_or_else(product_not_found)?;
    Ok(Json(DataResponse::new(ProductResponse::from(product))))
}

#[tracing::instrument(skip(state, body))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<DataResponse<ProductResponse>>, AppError> {
    let id = parse_product_id(&product_id)?;

    let result = state.store.update(&id, body.into()).await;
    observe("update", &result);

    let product = result?.ok_or_else(product_not_found)?;
    tracing::info!(product_id = %product.id, "Product updated");

    Ok(Json(DataResponse::new(ProductResponse::from(product))))
}

#[tracing::instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<DeleteProductResponse>, AppError> {
    let id = parse_product_id(&product_id)?;

    let result = state.store.delete(&id).await;
    observe("delete", &result);

    let product = result?.ok_or_else(product_not_found)?;
    tracing::info!(product_id = %product.id, "Product deleted");

    Ok(Json(DeleteProductResponse {
        success: true,
        message: "Product deleted".to_string(),
        data: ProductResponse::from(product),
    }))
}

pub async fn route_not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Route not found"))
}
