use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::point_history;
use crate::error::AppError;

use super::shared::{Pagination, validate_text};

/// Ledger reason for the signup credit.
pub const SIGNUP_REASON: &str = "회원 가입";
/// Ledger reason for the referrer credit.
pub const REFERRAL_REASON: &str = "추천인 이벤트";

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct PointHistoryRequest {
    /// Signed amount; negative for a debit.
    #[schema(example = 5000)]
    pub point: i32,
    #[schema(example = "회원 가입")]
    pub content: String,
}

impl PointHistoryRequest {
    pub fn new(point: i32, content: &str) -> Self {
        Self {
            point,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PointHistoryResponse {
    pub id: i32,
    pub member_id: i32,
    pub point: i32,
    pub total_point: i32,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<point_history::Model> for PointHistoryResponse {
    fn from(m: point_history::Model) -> Self {
        Self {
            id: m.id,
            member_id: m.member_id,
            point: m.point,
            total_point: m.total_point,
            content: m.content,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PointHistoryListResponse {
    pub data: Vec<PointHistoryResponse>,
    pub pagination: Pagination,
}

pub fn validate_point_history(req: &PointHistoryRequest) -> Result<(), AppError> {
    if req.point == 0 {
        return Err(AppError::Validation("Point must not be zero".into()));
    }
    validate_text("content", &req.content, 100)
}
