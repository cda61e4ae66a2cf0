use sea_orm::ConnectionTrait;
use tracing::info;

use crate::entity::member;
use crate::error::AppError;
use crate::extractors::auth::AuthMember;
use crate::models::dib::DibResponse;
use crate::repository;

pub struct DibService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DibService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    async fn resolve_member(&self, caller: &AuthMember) -> Result<member::Model, AppError> {
        repository::member::find_by_uuid(self.conn, &caller.uuid)
            .await?
            .ok_or(AppError::MemberNotFound)
    }

    /// Adding the same product twice keeps a single entry.
    pub async fn create_dib(&self, caller: &AuthMember, product_id: i32) -> Result<(), AppError> {
        let member = self.resolve_member(caller).await?;
        repository::product::find_active(self.conn, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        repository::dib::insert_ignore(self.conn, member.id, product_id).await?;
        info!(member_id = member.id, product_id, "dib added");
        Ok(())
    }

    pub async fn retrieve_dibs(&self, caller: &AuthMember) -> Result<Vec<DibResponse>, AppError> {
        let member = self.resolve_member(caller).await?;
        Ok(repository::dib::list_by_member(self.conn, member.id).await?)
    }

    /// Removing a product that is not in the list is not an error.
    pub async fn delete_dib(&self, caller: &AuthMember, product_id: i32) -> Result<(), AppError> {
        let member = self.resolve_member(caller).await?;
        let removed = repository::dib::delete(self.conn, member.id, product_id).await?;
        info!(member_id = member.id, product_id, removed, "dib removed");
        Ok(())
    }
}
