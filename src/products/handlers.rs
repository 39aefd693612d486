// HTTP handlers for product endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{Action, CurrentUser, Resource};
use crate::error::ApiError;
use crate::products::models::{CreateProduct, Product, ProductFilters, ProductQuery, UpdateProduct};
use crate::AppState;

/// Handler for GET /api/products
/// Public listing with search, category filter, price range, sort and pagination
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("search" = Option<String>, Query, description = "Partial name match, case-insensitive"),
        ("category" = Option<String>, Query, description = "Category filter"),
        ("min_price" = Option<f64>, Query, description = "Minimum price, inclusive"),
        ("max_price" = Option<f64>, Query, description = "Maximum price, inclusive"),
        ("sort" = Option<String>, Query, description = "Sort field: price or created"),
        ("order" = Option<String>, Query, description = "Sort order: asc or desc"),
        ("page" = Option<u32>, Query, description = "Page number, 1-indexed"),
        ("limit" = Option<u32>, Query, description = "Items per page, default 10"),
    ),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 400, description = "Invalid query parameters"),
    ),
    tag = "products"
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    tracing::debug!("Listing products with query: {:?}", query);

    let filters = ProductFilters::from_query(query)?;
    let products = state.products.list(&filters).await?;

    tracing::debug!("Query returned {} products", products.len());
    Ok(Json(products))
}

/// Handler for GET /api/products/:id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(product))
}

/// Handler for POST /api/products
/// Requires PRODUCT CREATE permission
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Missing PRODUCT permission"),
        (status = 409, description = "Duplicate product name"),
    ),
    tag = "products"
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    user.require(Resource::Product, Action::Create)?;
    payload.validate()?;

    if state.products.name_exists(&payload.name, None).await? {
        tracing::warn!("Attempt to create duplicate product: {}", payload.name);
        return Err(ApiError::Conflict {
            message: format!("Product with name '{}' already exists", payload.name),
        });
    }

    let product = state.products.create(&payload).await?;
    tracing::info!("User {} created product {}", user.id, product.id);

    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for PUT /api/products/:id
/// Requires PRODUCT UPDATE permission; partial update
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 403, description = "Missing PRODUCT permission"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProduct>,
) -> Result<Json<Product>, ApiError> {
    user.require(Resource::Product, Action::Update)?;
    payload.validate()?;

    let product = state.products.update(id, payload).await?;
    tracing::info!("User {} updated product {}", user.id, id);

    Ok(Json(product))
}

/// Handler for DELETE /api/products/:id
/// Requires PRODUCT DELETE permission
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Missing PRODUCT permission"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Resource::Product, Action::Delete)?;

    state.products.delete(id).await?;
    tracing::info!("User {} deleted product {}", user.id, id);

    Ok(StatusCode::NO_CONTENT)
}
