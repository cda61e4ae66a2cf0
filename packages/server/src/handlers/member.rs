use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::member::*;
use crate::models::point::{PointHistoryRequest, REFERRAL_REASON, SIGNUP_REASON};
use crate::models::product_inquiry::{ProductInquiryListResponse, ProductInquiryResponse};
use crate::models::shared::{PageQuery, PageRequest, Pagination};
use crate::services::member::MemberService;
use crate::services::point::PointService;
use crate::services::product_inquiry::ProductInquiryPostService;
use crate::state::AppState;

use super::location;

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Members",
    operation_id = "signup",
    summary = "Register a shop member",
    description = "Creates the member and credits the signup reward. When `referrer_uuid` names an \
        existing member, that member is credited the referral reward as well. An unknown referrer \
        is ignored. Member creation and both credits commit together.",
    request_body = ShopMemberSignupRequest,
    responses(
        (status = 201, description = "Member created", body = ShopMemberSignupResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Uuid already registered (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(uuid = %payload.uuid))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ShopMemberSignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rewards = &state.config.point;
    let txn = state.db.begin().await?;

    let response = MemberService::new(&txn).signup(&payload).await?;

    let points = PointService::new(&txn);
    if let Some(referrer_id) = response.referrer_member_id {
        points
            .create_point_history(
                referrer_id,
                &PointHistoryRequest::new(rewards.referral_reward, REFERRAL_REASON),
            )
            .await?;
    }
    points
        .create_point_history(
            response.signup_member_id,
            &PointHistoryRequest::new(rewards.signup_reward, SIGNUP_REASON),
        )
        .await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        location(format!("/shop/v1/members/{}", response.signup_member_id)),
        Json(response),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Members",
    operation_id = "getMember",
    summary = "Get a member by ID",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member profile", body = MemberResponse),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = MemberService::new(&state.db).retrieve_member(id).await?;
    Ok(Json(member.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/ggpass",
    tag = "GG Pass",
    operation_id = "getGgPass",
    summary = "Get GG pass status",
    description = "Returns the last renewal time and whether it is still within the validity window.",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Pass status", body = GgPassResponse),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_ggpass(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GgPassResponse>, AppError> {
    let updated_at = MemberService::new(&state.db)
        .retrieve_pass_updated_at(id)
        .await?;
    Ok(Json(GgPassResponse::new(
        id,
        updated_at,
        state.config.ggpass.validity_days,
    )))
}

#[utoipa::path(
    post,
    path = "/{id}/ggpass/subscribe",
    tag = "GG Pass",
    operation_id = "subscribeGgPass",
    summary = "Subscribe to or renew the GG pass",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Pass renewed now", body = GgPassResponse),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn subscribe_ggpass(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GgPassResponse>, AppError> {
    let member = MemberService::new(&state.db).subscribe_pass(id).await?;
    Ok(Json(GgPassResponse::new(
        member.id,
        member.ggpass_updated_at,
        state.config.ggpass.validity_days,
    )))
}

#[utoipa::path(
    post,
    path = "/{id}/ggpass/withdraw",
    tag = "GG Pass",
    operation_id = "withdrawGgPass",
    summary = "Withdraw from the GG pass",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Pass cleared", body = GgPassResponse),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn withdraw_ggpass(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GgPassResponse>, AppError> {
    let member = MemberService::new(&state.db).withdraw_pass(id).await?;
    Ok(Json(GgPassResponse::new(
        member.id,
        member.ggpass_updated_at,
        state.config.ggpass.validity_days,
    )))
}

#[utoipa::path(
    get,
    path = "/{id}/product-inquiries",
    tag = "Product Inquiries",
    operation_id = "listMemberInquiries",
    summary = "List a member's product inquiries",
    params(("id" = i32, Path, description = "Member ID"), PageQuery),
    responses(
        (status = 200, description = "Inquiries, newest first", body = ProductInquiryListResponse),
        (status = 404, description = "Member not found (MEMBER_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_member_inquiries(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ProductInquiryListResponse>, AppError> {
    let page = PageRequest::try_from(query)?;
    let (posts, total) = ProductInquiryPostService::new(&state.db)
        .retrieve_product_inquiries_by_member(id, page)
        .await?;

    Ok(Json(ProductInquiryListResponse {
        data: posts.into_iter().map(ProductInquiryResponse::from).collect(),
        pagination: Pagination::new(page, total),
    }))
}
