use axum::extract::DefaultBodyLimit;
use axum::extract::multipart::{Field, Multipart};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::extractors::json::parse_json_part;
use crate::models::image::ImageUpload;

pub fn image_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024) // 64 MB
}

/// A multipart request made of one JSON part plus image files.
pub struct JsonWithImages<T> {
    pub json: T,
    pub images: Vec<ImageUpload>,
}

/// Read `json_part` as JSON and every `image_part` field as an image.
/// Unknown fields are ignored.
pub async fn read_json_with_images<T: DeserializeOwned>(
    mut multipart: Multipart,
    json_part: &str,
    image_part: &str,
) -> Result<JsonWithImages<T>, AppError> {
    let mut json: Option<T> = None;
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(name) if name == json_part => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{json_part}': {e}")))?;
                json = Some(parse_json_part(json_part, &text)?);
            }
            Some(name) if name == image_part => {
                images.push(read_image(field).await?);
            }
            _ => {}
        }
    }

    let json = json.ok_or_else(|| AppError::Validation(format!("Missing '{json_part}' part")))?;
    Ok(JsonWithImages { json, images })
}

async fn read_image(field: Field<'_>) -> Result<ImageUpload, AppError> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation("Image part must have a filename".into()))?;
    let content_type = field
        .content_type()
        .filter(|ct| *ct != "application/octet-stream")
        .map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;

    Ok(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}
