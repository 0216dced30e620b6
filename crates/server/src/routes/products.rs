use axum::{extract::State, http::StatusCode, Json};
use common::types::Envelope;
use models::product::{Model, NewProduct, ProductPatch};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{errors::ApiError, extract::{ProductId, Valid}, state::ServerState};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Model>,
}

type ApiResult<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

#[utoipa::path(
    get, path = "/api/productcatalog", tag = "Products",
    responses(
        (status = 200, description = "List of products", body = crate::openapi::ProductListResponseDoc),
        (status = 500, description = "Error fetching products", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> ApiResult<ProductList> {
    let products = state
        .products
        .list()
        .await
        .map_err(|e| ApiError::from_service(e, "Error fetching products"))?;
    info!(count = products.len(), "list products");
    Ok((StatusCode::OK, Json(Envelope::data(ProductList { products }))))
}

#[utoipa::path(
    post, path = "/api/productcatalog", tag = "Products",
    request_body = crate::openapi::CreateProductDoc,
    responses(
        (status = 201, description = "Product created successfully", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Validation error", body = crate::openapi::ValidationErrorDoc),
        (status = 500, description = "Error creating product", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn create(State(state): State<ServerState>, Valid(input): Valid<NewProduct>) -> ApiResult<Model> {
    let created = state
        .products
        .create(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Error creating product"))?;
    Ok((StatusCode::CREATED, Json(Envelope::with_message("Product created successfully", created))))
}

#[utoipa::path(
    put, path = "/api/productcatalog/{id}", tag = "Products",
    params(("id" = String, Path, description = "Product ID (24 hex characters)")),
    request_body = crate::openapi::UpdateProductDoc,
    responses(
        (status = 200, description = "Product updated successfully", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Invalid request or validation error", body = crate::openapi::ValidationErrorDoc),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponseDoc),
        (status = 500, description = "Internal server error", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ProductId(id): ProductId,
    Valid(patch): Valid<ProductPatch>,
) -> ApiResult<Model> {
    let updated = state
        .products
        .update(&id, patch)
        .await
        .map_err(|e| ApiError::from_service(e, "Error updating product"))?;
    Ok((StatusCode::OK, Json(Envelope::with_message("Product updated successfully", updated))))
}

#[utoipa::path(
    delete, path = "/api/productcatalog/{id}", tag = "Products",
    params(("id" = String, Path, description = "Product ID (24 hex characters)")),
    responses(
        (status = 200, description = "Product deleted successfully", body = crate::openapi::MessageResponseDoc),
        (status = 400, description = "Invalid parameters", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Product not found", body = crate::openapi::MessageResponseDoc),
        (status = 500, description = "Error deleting product", body = crate::openapi::MessageResponseDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, ProductId(id): ProductId) -> ApiResult<()> {
    state
        .products
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_service(e, "Error deleting product"))?;
    Ok((StatusCode::OK, Json(Envelope::ok("Product deleted successfully"))))
}
