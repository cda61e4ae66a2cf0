use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entity::product;
use crate::error::AppError;

use super::image::ImageResponse;
use super::shared::{Pagination, validate_non_negative, validate_text};

/// Product fields sent as the `product` JSON part on create and update.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ProductRequest {
    #[schema(example = "101")]
    pub category_code: String,
    #[schema(example = "자몽 1kg")]
    pub name: String,
    /// Detail page body (HTML or Markdown).
    pub content: String,
    pub total_stock: i64,
    /// Price in KRW.
    #[schema(example = 12900)]
    pub price: i64,
    pub description: String,
    #[schema(example = "1봉")]
    pub unit: String,
    #[schema(example = "샛별배송")]
    pub delivery_type: String,
    #[schema(example = "미국산")]
    pub origin: String,
    #[schema(example = "냉장")]
    pub package_type: String,
    pub expiration_date: Option<NaiveDate>,
    pub allergy_info: Option<String>,
    pub capacity: Option<String>,
}

/// Full product, returned by detail lookups and mutations.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub asset_id: i32,
    pub category_code: String,
    pub name: String,
    pub content: String,
    pub total_stock: i64,
    pub price: i64,
    pub description: String,
    pub unit: String,
    pub delivery_type: String,
    pub origin: String,
    pub package_type: String,
    pub expiration_date: Option<NaiveDate>,
    pub allergy_info: Option<String>,
    pub capacity: Option<String>,
    pub images: Vec<ImageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once the product has been soft deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ProductResponse {
    pub fn new(m: product::Model, images: Vec<ImageResponse>) -> Self {
        Self {
            id: m.id,
            asset_id: m.asset_id,
            category_code: m.category_code,
            name: m.name,
            content: m.content,
            total_stock: m.total_stock,
            price: m.price,
            description: m.description,
            unit: m.unit,
            delivery_type: m.delivery_type,
            origin: m.origin,
            package_type: m.package_type,
            expiration_date: m.expiration_date,
            allergy_info: m.allergy_info,
            capacity: m.capacity,
            images,
            created_at: m.created_at,
            updated_at: m.updated_at,
            deleted_at: m.deleted_at,
        }
    }
}

/// Listing row. Also the document kept in the search index.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub category_code: String,
    pub name: String,
    pub price: i64,
    pub total_stock: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&ProductResponse> for ProductSummary {
    fn from(p: &ProductResponse) -> Self {
        Self {
            id: p.id,
            category_code: p.category_code.clone(),
            name: p.name.clone(),
            price: p.price,
            total_stock: p.total_stock,
            created_at: p.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<ProductSummary>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductSearchResponse {
    pub data: Vec<ProductSummary>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ProductSearchQuery {
    /// Case-insensitive substring of the product name.
    pub keyword: String,
}

pub fn validate_product(req: &ProductRequest) -> Result<(), AppError> {
    validate_text("category_code", &req.category_code, 6)?;
    validate_text("name", &req.name, 100)?;
    validate_non_negative("total_stock", req.total_stock)?;
    validate_non_negative("price", req.price)?;
    validate_text("unit", &req.unit, 20)?;
    validate_text("delivery_type", &req.delivery_type, 20)?;
    validate_text("origin", &req.origin, 50)?;
    validate_text("package_type", &req.package_type, 20)?;
    Ok(())
}
