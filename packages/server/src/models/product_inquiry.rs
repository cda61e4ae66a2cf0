use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::product_inquiry_post;
use crate::error::AppError;

use super::shared::{Pagination, validate_text};

/// Composite key of a product inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InquiryKey {
    pub product_id: i32,
    /// Sequence number within the product, starting at 1.
    pub inquiry_id: i32,
}

impl InquiryKey {
    pub fn new(product_id: i32, inquiry_id: i32) -> Self {
        Self {
            product_id,
            inquiry_id,
        }
    }
}

impl fmt::Display for InquiryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product_id, self.inquiry_id)
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ProductInquiryRequest {
    #[schema(example = "배송 문의")]
    pub title: String,
    pub content: String,
    /// Hidden from other shoppers when true.
    #[serde(default)]
    pub is_secret: bool,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ProductInquiryReplyRequest {
    pub admin_reply: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProductInquiryResponse {
    pub product_id: i32,
    pub inquiry_id: i32,
    pub member_id: i32,
    pub title: String,
    pub content: String,
    pub is_secret: bool,
    pub admin_reply: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<product_inquiry_post::Model> for ProductInquiryResponse {
    fn from(m: product_inquiry_post::Model) -> Self {
        Self {
            product_id: m.product_id,
            inquiry_id: m.inquiry_id,
            member_id: m.member_id,
            title: m.title,
            content: m.content,
            is_secret: m.is_secret,
            admin_reply: m.admin_reply,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductInquiryListResponse {
    pub data: Vec<ProductInquiryResponse>,
    pub pagination: Pagination,
}

pub fn validate_inquiry(req: &ProductInquiryRequest) -> Result<(), AppError> {
    validate_text("title", &req.title, 100)?;
    validate_text("content", &req.content, 2000)
}

pub fn validate_reply(req: &ProductInquiryReplyRequest) -> Result<(), AppError> {
    validate_text("admin_reply", &req.admin_reply, 2000)
}
