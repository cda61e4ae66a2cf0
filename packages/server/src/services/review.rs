use common::storage::BlobStore;
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::entity::review;
use crate::error::AppError;
use crate::extractors::auth::{AuthMember, ROLE_ADMIN};
use crate::models::image::ImageUpload;
use crate::models::review::*;
use crate::models::shared::PageRequest;
use crate::repository;

use super::image::store_uploads;

pub struct ReviewService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ReviewService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Member and product are resolved before anything is stored.
    pub async fn create_review(
        &self,
        blob_store: &dyn BlobStore,
        product_id: i32,
        member_uuid: &str,
        req: &ReviewCreateRequest,
        images: Vec<ImageUpload>,
    ) -> Result<ReviewResponse, AppError> {
        let member = repository::member::find_by_uuid(self.conn, member_uuid)
            .await?
            .ok_or(AppError::MemberNotFound)?;
        repository::product::find_active(self.conn, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        validate_create_review(req)?;

        let stored = store_uploads(blob_store, images).await?;
        let (asset, _) = repository::asset::create_with_images(self.conn, stored).await?;
        let review = repository::review::insert(
            self.conn,
            product_id,
            member.id,
            asset.id,
            req.content.trim(),
            req.rating,
        )
        .await?;
        info!(review_id = review.id, product_id, member_id = member.id, "review created");

        self.retrieve_review_details(review.id).await
    }

    pub async fn retrieve_reviews(
        &self,
        product_id: i32,
        page: PageRequest,
    ) -> Result<(Vec<ReviewResponse>, u64), AppError> {
        repository::product::find(self.conn, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        Ok(repository::review::page_by_product(self.conn, product_id, page).await?)
    }

    pub async fn retrieve_review_details(&self, review_id: i32) -> Result<ReviewResponse, AppError> {
        repository::review::find_projection(self.conn, review_id)
            .await?
            .ok_or(AppError::ReviewNotFound)
    }

    /// Only the review's author or an admin may change it. A caller whose
    /// uuid matches no member is treated as someone else.
    async fn authorize(&self, caller: &AuthMember, review: &review::Model) -> Result<(), AppError> {
        if caller.has_role(ROLE_ADMIN) {
            return Ok(());
        }
        match repository::member::find_by_uuid(self.conn, &caller.uuid).await? {
            Some(member) if member.id == review.member_id => Ok(()),
            _ => Err(AppError::PermissionDenied),
        }
    }

    pub async fn update_review(
        &self,
        caller: &AuthMember,
        review_id: i32,
        req: &ReviewUpdateRequest,
    ) -> Result<ReviewResponse, AppError> {
        let existing = repository::review::find(self.conn, review_id)
            .await?
            .ok_or(AppError::ReviewNotFound)?;
        self.authorize(caller, &existing).await?;
        validate_update_review(req)?;

        if let Some(asset_id) = req.asset_id
            && !repository::asset::exists(self.conn, asset_id).await?
        {
            return Err(AppError::Validation(format!("Asset {asset_id} does not exist")));
        }

        repository::review::update(
            self.conn,
            existing,
            req.asset_id,
            req.content.trim(),
            req.rating,
        )
        .await?;
        self.retrieve_review_details(review_id).await
    }

    pub async fn delete_review(&self, caller: &AuthMember, review_id: i32) -> Result<(), AppError> {
        let existing = repository::review::find(self.conn, review_id)
            .await?
            .ok_or(AppError::ReviewNotFound)?;
        self.authorize(caller, &existing).await?;

        if repository::review::delete(self.conn, review_id).await? == 0 {
            return Err(AppError::ReviewNotFound);
        }
        info!(review_id, by = %caller.uuid, "review deleted");
        Ok(())
    }

    /// Flip the approval flag and return the new state.
    pub async fn approve_review(&self, review_id: i32) -> Result<ReviewApproveResponse, AppError> {
        let existing = repository::review::find(self.conn, review_id)
            .await?
            .ok_or(AppError::ReviewNotFound)?;
        let approved = !existing.is_approved;
        let updated = repository::review::set_approved(self.conn, existing, approved).await?;
        info!(review_id, is_approved = updated.is_approved, "review approval toggled");

        Ok(ReviewApproveResponse {
            review_id: updated.id,
            is_approved: updated.is_approved,
        })
    }
}
