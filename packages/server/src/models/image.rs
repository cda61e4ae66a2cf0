use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::image;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ImageResponse {
    pub id: i32,
    pub asset_id: i32,
    /// Blob store path of the image.
    #[schema(example = "3f/9a1c...")]
    pub image_address: String,
    /// Original upload filename.
    #[schema(example = "grapefruit.png")]
    pub name: String,
    #[schema(example = "image/png")]
    pub content_type: Option<String>,
    pub size: i64,
    pub sequence: i32,
    pub created_at: DateTime<Utc>,
}

impl From<image::Model> for ImageResponse {
    fn from(m: image::Model) -> Self {
        Self {
            id: m.id,
            asset_id: m.asset_id,
            image_address: m.image_address,
            name: m.name,
            content_type: m.content_type,
            size: m.size,
            sequence: m.sequence,
            created_at: m.created_at,
        }
    }
}

/// An image received in a multipart upload, not yet stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
