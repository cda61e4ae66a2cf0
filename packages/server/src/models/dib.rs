use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DibRequest {
    pub product_id: i32,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DibQuery {
    /// Product to remove from the wish list.
    pub product_id: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DibResponse {
    pub product_id: i32,
    pub product_name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DibListResponse {
    pub data: Vec<DibResponse>,
}
