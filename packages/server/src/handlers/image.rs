use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::ContentHash;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::repository;
use crate::state::AppState;
use crate::utils::filename::content_disposition_value;

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Images",
    operation_id = "downloadImage",
    summary = "Download an uploaded image",
    description = "Streams a product or review image. Supports ETag-based caching via If-None-Match.",
    params(("id" = i32, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Image not found (IMAGE_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn download_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let image = repository::asset::find_image(&state.db, id)
        .await?
        .ok_or(AppError::ImageNotFound)?;

    let hash = ContentHash::from_relative_path(&image.image_address)?;
    let etag_value = format!("\"{}\"", hash.to_hex());
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.blob_store.get_stream(&hash).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = image
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, image.size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&image.name),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
