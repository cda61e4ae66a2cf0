use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminMember;
use crate::extractors::json::AppJson;
use crate::models::category::*;
use crate::services::category::CategoryService;
use crate::state::AppState;

use super::location;

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List categories",
    description = "All categories with their categorization, ordered by categorization then display sequence.",
    responses(
        (status = 200, description = "Categories", body = Vec<CategoryResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    Ok(Json(
        CategoryService::new(&state.db).retrieve_categories().await?,
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "adminListCategories",
    summary = "List categories",
    description = "Same listing as the shop endpoint. Requires `ROLE_ADMIN`.",
    responses(
        (status = 200, description = "Categories", body = Vec<CategoryResponse>),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn admin_list_categories(
    _admin: AdminMember,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    Ok(Json(
        CategoryService::new(&state.db).retrieve_categories().await?,
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "listCategorizations",
    summary = "List categorizations",
    description = "Requires `ROLE_ADMIN`.",
    responses(
        (status = 200, description = "Categorizations", body = Vec<CategorizationResponse>),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_categorizations(
    _admin: AdminMember,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategorizationResponse>>, AppError> {
    Ok(Json(
        CategoryService::new(&state.db)
            .retrieve_categorizations()
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/{code}",
    tag = "Categories",
    operation_id = "getCategory",
    summary = "Get a category by code",
    description = "Requires `ROLE_ADMIN`.",
    params(("code" = String, Path, description = "Category code")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Category not found (CATEGORY_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn get_category(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    Ok(Json(
        CategoryService::new(&state.db)
            .retrieve_category(&code)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category",
    description = "The categorization must exist. Requires `ROLE_ADMIN`.",
    request_body = CategoryCreateRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Categorization not found (CATEGORY_NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Code already used (CONFLICT)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(code = %payload.category_code))]
pub async fn create_category(
    _admin: AdminMember,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CategoryCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let category = CategoryService::new(&txn).create_category(&payload).await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        location(format!("/admin/v1/categories/{}", category.category_code)),
        Json(category),
    ))
}

#[utoipa::path(
    put,
    path = "/{code}",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Update a category",
    description = "Replaces name, sequence and categorization. An unknown categorization leaves the \
        category unchanged. Requires `ROLE_ADMIN`.",
    params(("code" = String, Path, description = "Category code")),
    request_body = CategoryUpdateRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Category or categorization not found (CATEGORY_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update_category(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(code): Path<String>,
    AppJson(payload): AppJson<CategoryUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let category = CategoryService::new(&txn)
        .update_category(&code, &payload)
        .await?;
    txn.commit().await?;

    Ok((
        location(format!("/admin/v1/categories/{}", category.category_code)),
        Json(category),
    ))
}

#[utoipa::path(
    delete,
    path = "/{code}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category",
    description = "Fails with 409 while any product, including soft-deleted ones, references it. \
        Requires `ROLE_ADMIN`.",
    params(("code" = String, Path, description = "Category code")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Category not found (CATEGORY_NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Category still in use (CONFLICT)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_category(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    CategoryService::new(&txn).delete_category(&code).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
