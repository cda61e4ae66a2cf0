use common::storage::BlobStore;
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::entity::product;
use crate::error::AppError;
use crate::models::image::{ImageResponse, ImageUpload};
use crate::models::product::*;
use crate::models::shared::PageRequest;
use crate::repository;
use crate::search::ProductIndex;

use super::image::store_uploads;

pub struct ProductService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ProductService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    async fn require_category(&self, code: &str) -> Result<(), AppError> {
        repository::category::find(self.conn, code.trim())
            .await?
            .ok_or(AppError::CategoryNotFound)?;
        Ok(())
    }

    async fn find_product(&self, id: i32) -> Result<product::Model, AppError> {
        repository::product::find(self.conn, id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn create_product(
        &self,
        blob_store: &dyn BlobStore,
        req: &ProductRequest,
        image: ImageUpload,
    ) -> Result<ProductResponse, AppError> {
        validate_product(req)?;
        self.require_category(&req.category_code).await?;

        let stored = store_uploads(blob_store, vec![image]).await?;
        let (asset, images) = repository::asset::create_with_images(self.conn, stored).await?;
        let model = repository::product::insert(self.conn, asset.id, req).await?;
        info!(product_id = model.id, "product created");

        Ok(ProductResponse::new(
            model,
            images.into_iter().map(ImageResponse::from).collect(),
        ))
    }

    /// Replace the product's fields. Without a new image the current asset is kept.
    pub async fn update_product(
        &self,
        blob_store: &dyn BlobStore,
        id: i32,
        req: &ProductRequest,
        image: Option<ImageUpload>,
    ) -> Result<ProductResponse, AppError> {
        validate_product(req)?;
        let existing = self.find_product(id).await?;
        self.require_category(&req.category_code).await?;

        let new_asset = match image {
            Some(upload) => {
                let stored = store_uploads(blob_store, vec![upload]).await?;
                let (asset, _) = repository::asset::create_with_images(self.conn, stored).await?;
                Some(asset.id)
            }
            None => None,
        };

        let model = repository::product::update(self.conn, existing, new_asset, req).await?;
        let images = repository::asset::images_of(self.conn, model.asset_id).await?;
        info!(product_id = id, new_asset = new_asset.is_some(), "product updated");

        Ok(ProductResponse::new(
            model,
            images.into_iter().map(ImageResponse::from).collect(),
        ))
    }

    /// Soft delete. Deleting an already deleted product changes nothing.
    pub async fn delete_product(&self, id: i32) -> Result<product::Model, AppError> {
        let existing = self.find_product(id).await?;
        if existing.is_deleted() {
            return Ok(existing);
        }
        let model = repository::product::soft_delete(self.conn, existing).await?;
        info!(product_id = id, "product soft deleted");
        Ok(model)
    }

    pub async fn retrieve_products(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<ProductSummary>, u64), AppError> {
        Ok(repository::product::page_active(self.conn, page).await?)
    }

    /// Soft-deleted products are returned too, with `deleted_at` set.
    pub async fn retrieve_product_details(&self, id: i32) -> Result<ProductResponse, AppError> {
        let model = self.find_product(id).await?;
        let images = repository::asset::images_of(self.conn, model.asset_id).await?;
        Ok(ProductResponse::new(
            model,
            images.into_iter().map(ImageResponse::from).collect(),
        ))
    }

    /// Answered from `index` when given, otherwise with a LIKE query.
    pub async fn search_products_by_name(
        &self,
        index: Option<&ProductIndex>,
        keyword: &str,
    ) -> Result<Vec<ProductSummary>, AppError> {
        if keyword.trim().is_empty() {
            return Err(AppError::Validation("keyword must not be empty".into()));
        }
        match index {
            Some(index) => Ok(index.search(keyword)),
            None => Ok(repository::product::search_by_name(self.conn, keyword).await?),
        }
    }

    pub async fn search_product_by_category(
        &self,
        category_code: &str,
        page: PageRequest,
    ) -> Result<(Vec<ProductSummary>, u64), AppError> {
        self.require_category(category_code).await?;
        Ok(repository::product::page_active_by_category(self.conn, category_code, page).await?)
    }
}
