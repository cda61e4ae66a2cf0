use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthMember;
use crate::extractors::json::AppJson;
use crate::models::dib::*;
use crate::services::dib::DibService;
use crate::state::AppState;

use super::location;

#[utoipa::path(
    post,
    path = "/",
    tag = "Dibs",
    operation_id = "createDib",
    summary = "Add a product to the caller's wish list",
    description = "Idempotent: adding a product already in the list succeeds without a duplicate.",
    request_body = DibRequest,
    responses(
        (status = 201, description = "Product is in the wish list"),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 404, description = "Member or product not found (MEMBER_NOT_FOUND, PRODUCT_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [])),
)]
#[instrument(skip(state, caller, payload), fields(uuid = %caller.uuid, product_id = payload.product_id))]
pub async fn create_dib(
    caller: AuthMember,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DibRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    DibService::new(&txn)
        .create_dib(&caller, payload.product_id)
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, location("/shop/v1/dibs".to_string())))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Dibs",
    operation_id = "listDibs",
    summary = "List the caller's wish list",
    responses(
        (status = 200, description = "Wish list, newest first", body = DibListResponse),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [])),
)]
#[instrument(skip(state, caller), fields(uuid = %caller.uuid))]
pub async fn list_dibs(
    caller: AuthMember,
    State(state): State<AppState>,
) -> Result<Json<DibListResponse>, AppError> {
    let data = DibService::new(&state.db).retrieve_dibs(&caller).await?;
    Ok(Json(DibListResponse { data }))
}

#[utoipa::path(
    delete,
    path = "/",
    tag = "Dibs",
    operation_id = "deleteDib",
    summary = "Remove a product from the caller's wish list",
    description = "Removing a product that is not in the list also succeeds.",
    params(DibQuery),
    responses(
        (status = 204, description = "Product is not in the wish list"),
        (status = 401, description = "Missing identity (AUTH_ID_MISSING)", body = ErrorBody),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
    security(("auth_id" = [])),
)]
#[instrument(skip(state, caller, query), fields(uuid = %caller.uuid, product_id = query.product_id))]
pub async fn delete_dib(
    caller: AuthMember,
    State(state): State<AppState>,
    Query(query): Query<DibQuery>,
) -> Result<impl IntoResponse, AppError> {
    DibService::new(&state.db)
        .delete_dib(&caller, query.product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
