use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::member;
use crate::error::AppError;

use super::shared::validate_text;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ShopMemberSignupRequest {
    /// Member uuid issued by the auth service.
    #[schema(example = "4b1f0d8e-2c1a-4c5e-9a57-0d8c6a1e7f10")]
    pub uuid: String,
    /// Uuid of the member who referred this one, if any.
    pub referrer_uuid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct ShopMemberSignupResponse {
    pub signup_member_id: i32,
    pub referrer_member_id: Option<i32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MemberResponse {
    pub id: i32,
    pub uuid: String,
    pub referrer_id: Option<i32>,
    pub ggpass_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<member::Model> for MemberResponse {
    fn from(m: member::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            referrer_id: m.referrer_id,
            ggpass_updated_at: m.ggpass_updated_at,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct GgPassResponse {
    pub member_id: i32,
    /// Last renewal; absent when not subscribed.
    pub ggpass_updated_at: Option<DateTime<Utc>>,
    /// Whether the last renewal is still within the validity window.
    pub active: bool,
}

impl GgPassResponse {
    pub fn new(member_id: i32, updated_at: Option<DateTime<Utc>>, validity_days: i64) -> Self {
        Self {
            member_id,
            ggpass_updated_at: updated_at,
            active: pass_is_active(updated_at, validity_days, Utc::now()),
        }
    }
}

pub fn pass_is_active(
    updated_at: Option<DateTime<Utc>>,
    validity_days: i64,
    now: DateTime<Utc>,
) -> bool {
    let Some(at) = updated_at else {
        return false;
    };
    // A window past chrono's range never closes; one before it never opened.
    match TimeDelta::try_days(validity_days).and_then(|window| at.checked_add_signed(window)) {
        Some(expires_at) => expires_at > now,
        None => validity_days > 0,
    }
}

pub fn validate_signup(req: &ShopMemberSignupRequest) -> Result<(), AppError> {
    validate_text("uuid", &req.uuid, 64)?;
    if let Some(ref referrer) = req.referrer_uuid
        && referrer.trim() == req.uuid.trim()
    {
        return Err(AppError::Validation(
            "A member cannot refer themselves".into(),
        ));
    }
    Ok(())
}
