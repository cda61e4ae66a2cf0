use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AdminMember, AuthMember};
use crate::extractors::json::AppJson;
use crate::models::product_inquiry::*;
use crate::models::shared::{PageQuery, PageRequest, Pagination};
use crate::services::product_inquiry::ProductInquiryPostService;
use crate::state::AppState;

use super::location;

#[utoipa::path(
    post,
    path = "/{id}/inquiries",
    tag = "Product Inquiries",
    operation_id = "createInquiry",
    summary = "Ask a question about a product",
    description = "The author is the caller identified by `AUTH-ID`. Inquiry ids count up per product.",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductInquiryRequest,
    responses(
        (status = 201, description = "Inquiry created", body = ProductInquiryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 404, description = "Member or product not found (MEMBER_NOT_FOUND, PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [])),
)]
#[instrument(skip(state, caller, payload), fields(uuid = %caller.uuid))]
pub async fn create_inquiry(
    caller: AuthMember,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ProductInquiryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let post = ProductInquiryPostService::new(&txn)
        .create_product_inquiry(id, &caller.uuid, &payload)
        .await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        location(format!("/shop/v1/products/{id}/inquiries")),
        Json(ProductInquiryResponse::from(post)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/inquiries",
    tag = "Product Inquiries",
    operation_id = "listProductInquiries",
    summary = "List inquiries about a product",
    params(("id" = i32, Path, description = "Product ID"), PageQuery),
    responses(
        (status = 200, description = "Inquiries, latest first", body = ProductInquiryListResponse),
        (status = 404, description = "Product not found (PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_product_inquiries(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ProductInquiryListResponse>, AppError> {
    let page = PageRequest::try_from(query)?;
    let (posts, total) = ProductInquiryPostService::new(&state.db)
        .retrieve_product_inquiries_by_product(id, page)
        .await?;

    Ok(Json(ProductInquiryListResponse {
        data: posts.into_iter().map(ProductInquiryResponse::from).collect(),
        pagination: Pagination::new(page, total),
    }))
}

#[utoipa::path(
    put,
    path = "/{id}/inquiries/{inquiry_id}/reply",
    tag = "Product Inquiries",
    operation_id = "replyInquiry",
    summary = "Answer a product inquiry",
    description = "Sets or replaces the admin reply. Requires `ROLE_ADMIN`.",
    params(
        ("id" = i32, Path, description = "Product ID"),
        ("inquiry_id" = i32, Path, description = "Inquiry ID within the product"),
    ),
    request_body = ProductInquiryReplyRequest,
    responses(
        (status = 200, description = "Inquiry answered", body = ProductInquiryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Inquiry not found (PRODUCT_INQUIRY_POST_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn reply_inquiry(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path((id, inquiry_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<ProductInquiryReplyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let key = InquiryKey::new(id, inquiry_id);

    let txn = state.db.begin().await?;
    let post = ProductInquiryPostService::new(&txn)
        .update_product_inquiry_reply(key, &payload)
        .await?;
    txn.commit().await?;

    Ok((
        location(format!("/shop/v1/products/{id}/inquiries")),
        Json(ProductInquiryResponse::from(post)),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}/inquiries/{inquiry_id}",
    tag = "Product Inquiries",
    operation_id = "deleteInquiry",
    summary = "Delete a product inquiry",
    description = "Requires `ROLE_ADMIN`.",
    params(
        ("id" = i32, Path, description = "Product ID"),
        ("inquiry_id" = i32, Path, description = "Inquiry ID within the product"),
    ),
    responses(
        (status = 204, description = "Inquiry deleted"),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Inquiry not found (PRODUCT_INQUIRY_POST_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_inquiry(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path((id, inquiry_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    ProductInquiryPostService::new(&state.db)
        .delete_product_inquiry(InquiryKey::new(id, inquiry_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
