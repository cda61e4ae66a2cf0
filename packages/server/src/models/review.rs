use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::shared::{Pagination, validate_text};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ReviewCreateRequest {
    #[schema(example = "신선하고 맛있어요")]
    pub content: String,
    /// 1 to 5.
    #[schema(example = 5)]
    pub rating: i32,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ReviewUpdateRequest {
    pub content: String,
    pub rating: i32,
    /// Re-point the review at another asset. Must exist.
    pub asset_id: Option<i32>,
}

#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub product_id: i32,
    pub member_id: i32,
    pub asset_id: i32,
    pub content: String,
    pub rating: i32,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ReviewApproveResponse {
    pub review_id: i32,
    pub is_approved: bool,
}

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::Validation(format!(
            "Rating must be {MIN_RATING}-{MAX_RATING}"
        )));
    }
    Ok(())
}

pub fn validate_create_review(req: &ReviewCreateRequest) -> Result<(), AppError> {
    validate_text("content", &req.content, 2000)?;
    validate_rating(req.rating)
}

pub fn validate_update_review(req: &ReviewUpdateRequest) -> Result<(), AppError> {
    validate_text("content", &req.content, 2000)?;
    validate_rating(req.rating)
}
