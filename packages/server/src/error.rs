use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `AUTH_ID_MISSING`,
    /// `PERMISSION_DENIED`, `MEMBER_NOT_FOUND`, `PRODUCT_NOT_FOUND`,
    /// `CATEGORY_NOT_FOUND`, `REVIEW_NOT_FOUND`, `PRODUCT_INQUIRY_POST_NOT_FOUND`,
    /// `IMAGE_NOT_FOUND`, `CONFLICT`, `INTERNAL_ERROR`.
    #[schema(example = "PRODUCT_NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Product not found")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("AUTH-ID header is required")]
    AuthMissing,
    #[error("Insufficient permissions")]
    PermissionDenied,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Product not found")]
    ProductNotFound,
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Review not found")]
    ReviewNotFound,
    #[error("Product inquiry not found")]
    ProductInquiryPostNotFound,
    #[error("Image not found")]
    ImageNotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::AuthMissing => "AUTH_ID_MISSING",
            AppError::PermissionDenied => "PERMISSION_DENIED",
            AppError::MemberNotFound => "MEMBER_NOT_FOUND",
            AppError::ProductNotFound => "PRODUCT_NOT_FOUND",
            AppError::CategoryNotFound => "CATEGORY_NOT_FOUND",
            AppError::ReviewNotFound => "REVIEW_NOT_FOUND",
            AppError::ProductInquiryPostNotFound => "PRODUCT_INQUIRY_POST_NOT_FOUND",
            AppError::ImageNotFound => "IMAGE_NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AuthMissing => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied => StatusCode::FORBIDDEN,
            AppError::MemberNotFound
            | AppError::ProductNotFound
            | AppError::CategoryNotFound
            | AppError::ReviewNotFound
            | AppError::ProductInquiryPostNotFound
            | AppError::ImageNotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            code: self.code(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SizeLimitExceeded { .. } | StorageError::Empty => {
                AppError::Validation(err.to_string())
            }
            StorageError::NotFound(_) => AppError::ImageNotFound,
            other => AppError::Internal(other.to_string()),
        }
    }
}
