use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminMember;
use crate::extractors::json::AppJson;
use crate::models::point::*;
use crate::models::shared::{PageQuery, PageRequest, Pagination};
use crate::services::point::PointService;
use crate::state::AppState;

use super::location;

#[utoipa::path(
    get,
    path = "/{id}/points",
    tag = "Points",
    operation_id = "listPointHistories",
    summary = "List a member's point history",
    description = "Ledger entries newest first. `total_point` of the first entry is the current balance.",
    params(("id" = i32, Path, description = "Member ID"), PageQuery),
    responses(
        (status = 200, description = "Point history", body = PointHistoryListResponse),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_point_histories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PointHistoryListResponse>, AppError> {
    let page = PageRequest::try_from(query)?;
    let (entries, total) = PointService::new(&state.db)
        .retrieve_point_histories(id, page)
        .await?;

    Ok(Json(PointHistoryListResponse {
        data: entries.into_iter().map(PointHistoryResponse::from).collect(),
        pagination: Pagination::new(page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/{id}/points",
    tag = "Points",
    operation_id = "createPointHistory",
    summary = "Credit or debit member points",
    description = "Appends a signed ledger entry. Requires `ROLE_ADMIN`.",
    params(("id" = i32, Path, description = "Member ID")),
    request_body = PointHistoryRequest,
    responses(
        (status = 201, description = "Entry appended", body = PointHistoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [], "roles" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(point = payload.point))]
pub async fn create_point_history(
    _admin: AdminMember,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PointHistoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let entry = PointService::new(&txn)
        .create_point_history(id, &payload)
        .await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        location(format!("/shop/v1/members/{id}/points")),
        Json(PointHistoryResponse::from(entry)),
    ))
}
