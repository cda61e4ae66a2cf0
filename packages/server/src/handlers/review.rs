use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AdminMember, AuthMember};
use crate::extractors::json::AppJson;
use crate::models::review::*;
use crate::models::shared::{PageQuery, PageRequest, Pagination, SingleResponse};
use crate::services::review::ReviewService;
use crate::state::AppState;

use super::location;
use super::multipart::read_json_with_images;

#[utoipa::path(
    post,
    path = "/{product_id}/review/{id}",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Write a review",
    description = "Multipart request: a `review` JSON part (`content`, `rating` 1-5) and zero or \
        more `images` files. The review starts unapproved.",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("id" = String, Path, description = "Uuid of the reviewing member"),
    ),
    request_body(content_type = "multipart/form-data", description = "`review` JSON part plus `images` files"),
    responses(
        (status = 201, description = "Review created", body = SingleResponse<ReviewResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Member or product not found (MEMBER_NOT_FOUND, PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_review(
    State(state): State<AppState>,
    Path((product_id, member_uuid)): Path<(i32, String)>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let request = read_json_with_images::<ReviewCreateRequest>(multipart, "review", "images").await?;

    let txn = state.db.begin().await?;
    let review = ReviewService::new(&txn)
        .create_review(
            &*state.blob_store,
            product_id,
            &member_uuid,
            &request.json,
            request.images,
        )
        .await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        location(format!("/products/{product_id}/review/{}", review.id)),
        Json(SingleResponse::new(review)),
    ))
}

#[utoipa::path(
    get,
    path = "/{product_id}/review",
    tag = "Reviews",
    operation_id = "listReviews",
    summary = "List reviews of a product",
    params(("product_id" = i32, Path, description = "Product ID"), PageQuery),
    responses(
        (status = 200, description = "Review page, newest first", body = SingleResponse<ReviewPage>),
        (status = 404, description = "Product not found (PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SingleResponse<ReviewPage>>, AppError> {
    let page = PageRequest::try_from(query)?;
    let (reviews, total) = ReviewService::new(&state.db)
        .retrieve_reviews(product_id, page)
        .await?;

    Ok(Json(SingleResponse::new(ReviewPage {
        reviews,
        pagination: Pagination::new(page, total),
    })))
}

#[utoipa::path(
    get,
    path = "/{product_id}/review/{id}",
    tag = "Reviews",
    operation_id = "getReview",
    summary = "Get a review",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("id" = i32, Path, description = "Review ID"),
    ),
    responses(
        (status = 200, description = "Review", body = SingleResponse<ReviewResponse>),
        (status = 404, description = "Review not found (REVIEW_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_review(
    State(state): State<AppState>,
    Path((product_id, id)): Path<(i32, i32)>,
) -> Result<Json<SingleResponse<ReviewResponse>>, AppError> {
    let review = ReviewService::new(&state.db)
        .retrieve_review_details(id)
        .await?;
    if review.product_id != product_id {
        return Err(AppError::ReviewNotFound);
    }
    Ok(Json(SingleResponse::new(review)))
}

#[utoipa::path(
    put,
    path = "/{product_id}/review/{id}",
    tag = "Reviews",
    operation_id = "updateReview",
    summary = "Update a review",
    description = "Replaces content and rating. A given `asset_id` must reference an existing asset. \
        Only the author of the review or a `ROLE_ADMIN` caller may update it.",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("id" = i32, Path, description = "Review ID"),
    ),
    request_body = ReviewUpdateRequest,
    responses(
        (status = 200, description = "Review updated", body = SingleResponse<ReviewResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Review not found (REVIEW_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, caller, payload), fields(caller = %caller.uuid))]
pub async fn update_review(
    caller: AuthMember,
    State(state): State<AppState>,
    Path((product_id, id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<ReviewUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let service = ReviewService::new(&txn);
    if service.retrieve_review_details(id).await?.product_id != product_id {
        return Err(AppError::ReviewNotFound);
    }
    let review = service.update_review(&caller, id, &payload).await?;
    txn.commit().await?;

    Ok((
        location(format!("/products/{product_id}/review/{id}")),
        Json(SingleResponse::new(review)),
    ))
}

#[utoipa::path(
    delete,
    path = "/{product_id}/review/{id}",
    tag = "Reviews",
    operation_id = "deleteReview",
    summary = "Delete a review",
    description = "Only the author of the review or a `ROLE_ADMIN` caller may delete it.",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("id" = i32, Path, description = "Review ID"),
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Review not found (REVIEW_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, caller), fields(caller = %caller.uuid))]
pub async fn delete_review(
    caller: AuthMember,
    State(state): State<AppState>,
    Path((product_id, id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let service = ReviewService::new(&txn);
    if service.retrieve_review_details(id).await?.product_id != product_id {
        return Err(AppError::ReviewNotFound);
    }
    service.delete_review(&caller, id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Reviews",
    operation_id = "approveReview",
    summary = "Toggle review approval",
    description = "Flips `is_approved` and returns the new state. Requires `ROLE_ADMIN`.",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "New approval state", body = ReviewApproveResponse),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Review not found (REVIEW_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn approve_review(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ReviewApproveResponse>, AppError> {
    let txn = state.db.begin().await?;
    let response = ReviewService::new(&txn).approve_review(id).await?;
    txn.commit().await?;

    Ok(Json(response))
}
