use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::product::*;
use crate::models::shared::{PageQuery, PageRequest, Pagination};
use crate::services::product::ProductService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Products",
    operation_id = "listProducts",
    summary = "List products",
    description = "Active products, newest first. Soft-deleted products are excluded.",
    params(PageQuery),
    responses(
        (status = 200, description = "Product page", body = ProductListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ProductListResponse>, AppError> {
    let page = PageRequest::try_from(query)?;
    let (data, total) = ProductService::new(&state.db)
        .retrieve_products(page)
        .await?;
    Ok(Json(ProductListResponse {
        data,
        pagination: Pagination::new(page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    operation_id = "getProduct",
    summary = "Get a product by ID",
    description = "Soft-deleted products are still returned, with `deleted_at` set.",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found (PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = ProductService::new(&state.db)
        .retrieve_product_details(id)
        .await?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    operation_id = "searchProducts",
    summary = "Search products by name",
    description = "Case-insensitive substring match over active products. Served from the search \
        index (ranked: exact, prefix, then earliest match) when `search.enabled`, otherwise from \
        the database (newest first).",
    params(ProductSearchQuery),
    responses(
        (status = 200, description = "Matching products", body = ProductSearchResponse),
        (status = 400, description = "Empty keyword (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(keyword = %query.keyword))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<ProductSearchQuery>,
) -> Result<Json<ProductSearchResponse>, AppError> {
    let index = state
        .config
        .search
        .enabled
        .then_some(&*state.product_index);
    let data = ProductService::new(&state.db)
        .search_products_by_name(index, &query.keyword)
        .await?;
    Ok(Json(ProductSearchResponse { data }))
}

#[utoipa::path(
    get,
    path = "/{code}/products",
    tag = "Categories",
    operation_id = "listCategoryProducts",
    summary = "List products in a category",
    params(("code" = String, Path, description = "Category code"), PageQuery),
    responses(
        (status = 200, description = "Product page", body = ProductListResponse),
        (status = 404, description = "Category not found (CATEGORY_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_category_products(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ProductListResponse>, AppError> {
    let page = PageRequest::try_from(query)?;
    let (data, total) = ProductService::new(&state.db)
        .search_product_by_category(&code, page)
        .await?;
    Ok(Json(ProductListResponse {
        data,
        pagination: Pagination::new(page, total),
    }))
}
