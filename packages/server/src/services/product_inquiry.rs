use sea_orm::ConnectionTrait;
use tracing::info;

use crate::entity::product_inquiry_post;
use crate::error::AppError;
use crate::models::product_inquiry::*;
use crate::models::shared::PageRequest;
use crate::repository;

pub struct ProductInquiryPostService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

type InquiryPage = (Vec<product_inquiry_post::Model>, u64);

impl<'a, C: ConnectionTrait> ProductInquiryPostService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Must run in a transaction: the product row stays locked until commit, so
    /// concurrent creates for one product take turns reading the next inquiry id.
    pub async fn create_product_inquiry(
        &self,
        product_id: i32,
        member_uuid: &str,
        req: &ProductInquiryRequest,
    ) -> Result<product_inquiry_post::Model, AppError> {
        validate_inquiry(req)?;
        let member = repository::member::find_by_uuid(self.conn, member_uuid)
            .await?
            .ok_or(AppError::MemberNotFound)?;
        repository::product::lock_active(self.conn, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let inquiry_id =
            repository::product_inquiry_post::next_inquiry_id(self.conn, product_id).await?;
        let key = InquiryKey::new(product_id, inquiry_id);
        let post = repository::product_inquiry_post::insert(self.conn, key, member.id, req).await?;
        info!(%key, member_id = member.id, "product inquiry created");
        Ok(post)
    }

    pub async fn retrieve_product_inquiries_by_product(
        &self,
        product_id: i32,
        page: PageRequest,
    ) -> Result<InquiryPage, AppError> {
        repository::product::find(self.conn, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        Ok(repository::product_inquiry_post::page_by_product(self.conn, product_id, page).await?)
    }

    pub async fn retrieve_product_inquiries_by_member(
        &self,
        member_id: i32,
        page: PageRequest,
    ) -> Result<InquiryPage, AppError> {
        repository::member::find(self.conn, member_id)
            .await?
            .ok_or(AppError::MemberNotFound)?;
        Ok(repository::product_inquiry_post::page_by_member(self.conn, member_id, page).await?)
    }

    pub async fn update_product_inquiry_reply(
        &self,
        key: InquiryKey,
        req: &ProductInquiryReplyRequest,
    ) -> Result<product_inquiry_post::Model, AppError> {
        validate_reply(req)?;
        let existing = repository::product_inquiry_post::find(self.conn, key)
            .await?
            .ok_or(AppError::ProductInquiryPostNotFound)?;
        let post =
            repository::product_inquiry_post::set_reply(self.conn, existing, req.admin_reply.trim())
                .await?;
        info!(%key, "product inquiry answered");
        Ok(post)
    }

    pub async fn delete_product_inquiry(&self, key: InquiryKey) -> Result<(), AppError> {
        if repository::product_inquiry_post::delete(self.conn, key).await? == 0 {
            return Err(AppError::ProductInquiryPostNotFound);
        }
        info!(%key, "product inquiry deleted");
        Ok(())
    }
}
