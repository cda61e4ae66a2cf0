use common::storage::BlobStore;
use tracing::debug;

use crate::error::AppError;
use crate::models::image::ImageUpload;
use crate::repository::asset::NewImage;
use crate::utils::filename::validate_flat_filename;

/// Write uploads to the blob store and describe them for the `image` table.
pub async fn store_uploads(
    blob_store: &dyn BlobStore,
    uploads: Vec<ImageUpload>,
) -> Result<Vec<NewImage>, AppError> {
    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let name = validate_flat_filename(&upload.file_name)
            .map_err(|e| AppError::Validation(e.message().into()))?
            .to_string();
        let content_type = upload
            .content_type
            .or_else(|| mime_guess::from_path(&name).first().map(|m| m.to_string()));
        if !content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
        {
            return Err(AppError::Validation(format!("'{name}' is not an image")));
        }

        let hash = blob_store.put(&upload.bytes).await?;
        debug!(%hash, %name, "stored image");
        stored.push(NewImage {
            image_address: hash.relative_path(),
            name,
            content_type,
            size: upload.bytes.len() as i64,
        });
    }
    Ok(stored)
}
