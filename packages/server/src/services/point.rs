use sea_orm::ConnectionTrait;
use tracing::info;

use crate::entity::point_history;
use crate::error::AppError;
use crate::models::point::{PointHistoryRequest, validate_point_history};
use crate::models::shared::PageRequest;
use crate::repository;

pub struct PointService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> PointService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Append a ledger entry; the running total carries on from the latest one.
    pub async fn create_point_history(
        &self,
        member_id: i32,
        req: &PointHistoryRequest,
    ) -> Result<point_history::Model, AppError> {
        validate_point_history(req)?;
        repository::member::find(self.conn, member_id)
            .await?
            .ok_or(AppError::MemberNotFound)?;

        let previous = repository::point_history::latest_total(self.conn, member_id).await?;
        let total = previous
            .checked_add(req.point)
            .ok_or_else(|| AppError::Validation("Point balance out of range".into()))?;

        let entry = repository::point_history::append(
            self.conn,
            member_id,
            req.point,
            total,
            req.content.trim(),
        )
        .await?;
        info!(member_id, point = req.point, total, "point history appended");
        Ok(entry)
    }

    pub async fn retrieve_point_histories(
        &self,
        member_id: i32,
        page: PageRequest,
    ) -> Result<(Vec<point_history::Model>, u64), AppError> {
        repository::member::find(self.conn, member_id)
            .await?
            .ok_or(AppError::MemberNotFound)?;
        Ok(repository::point_history::page_by_member(self.conn, member_id, page).await?)
    }
}
