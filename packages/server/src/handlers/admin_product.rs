use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminMember;
use crate::models::product::*;
use crate::models::shared::{PageQuery, PageRequest, Pagination};
use crate::services::product::ProductService;
use crate::state::AppState;

use super::location;
use super::multipart::read_json_with_images;

/// Mirror a committed product into the search index.
fn refresh_index(state: &AppState, product: &ProductResponse) {
    if product.deleted_at.is_some() {
        state.product_index.remove(product.id);
    } else {
        state.product_index.upsert(ProductSummary::from(product));
    }
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Admin Products",
    operation_id = "createProduct",
    summary = "Register a product",
    description = "Multipart request: a `product` JSON part and exactly one `image` file. \
        Requires `ROLE_ADMIN`.",
    request_body(content_type = "multipart/form-data", description = "`product` JSON part plus an `image` file"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Category not found (CATEGORY_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn create_product(
    _admin: AdminMember,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let request = read_json_with_images::<ProductRequest>(multipart, "product", "image").await?;
    let image = single_image(request.images)?
        .ok_or_else(|| AppError::Validation("Missing 'image' part".into()))?;

    let txn = state.db.begin().await?;
    let product = ProductService::new(&txn)
        .create_product(&*state.blob_store, &request.json, image)
        .await?;
    txn.commit().await?;

    refresh_index(&state, &product);

    Ok((
        StatusCode::CREATED,
        location(format!("/admin/v1/products/{}", product.id)),
        Json(product),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Admin Products",
    operation_id = "adminListProducts",
    summary = "List products",
    description = "Active products, newest first. Requires `ROLE_ADMIN`.",
    params(PageQuery),
    responses(
        (status = 200, description = "Product page", body = ProductListResponse),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_products(
    _admin: AdminMember,
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
    tag = "Admin Products",
    operation_id = "adminGetProduct",
    summary = "Get a product by ID",
    description = "Soft-deleted products are returned with `deleted_at` set. Requires `ROLE_ADMIN`.",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Product not found (PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn get_product(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, AppError> {
    Ok(Json(
        ProductService::new(&state.db)
            .retrieve_product_details(id)
            .await?,
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Admin Products",
    operation_id = "updateProduct",
    summary = "Update a product",
    description = "Multipart request: a `product` JSON part and an optional `image` file. Without an \
        image the current one is kept. Requires `ROLE_ADMIN`.",
    params(("id" = i32, Path, description = "Product ID")),
    request_body(content_type = "multipart/form-data", description = "`product` JSON part plus an optional `image` file"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Product or category not found (PRODUCT_NOT_FOUND, CATEGORY_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn update_product(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let request = read_json_with_images::<ProductRequest>(multipart, "product", "image").await?;
    let image = single_image(request.images)?;

    let txn = state.db.begin().await?;
    let product = ProductService::new(&txn)
        .update_product(&*state.blob_store, id, &request.json, image)
        .await?;
    txn.commit().await?;

    refresh_index(&state, &product);

    Ok((
        location(format!("/admin/v1/products/{id}")),
        Json(product),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Admin Products",
    operation_id = "deleteProduct",
    summary = "Soft delete a product",
    description = "Stamps `deleted_at`; the row stays and detail lookups still return it. \
        Deleting twice succeeds. Requires `ROLE_ADMIN`.",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Product not found (PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_product(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    ProductService::new(&txn).delete_product(id).await?;
    txn.commit().await?;

    state.product_index.remove(id);

    Ok(StatusCode::NO_CONTENT)
}

fn single_image<T>(mut images: Vec<T>) -> Result<Option<T>, AppError> {
    if images.len() > 1 {
        return Err(AppError::Validation("Only one 'image' part is allowed".into()));
    }
    Ok(images.pop())
}
