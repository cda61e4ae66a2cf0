use chrono::Utc;
use sea_orm::*;

use crate::entity::point_history;
use crate::models::shared::PageRequest;

/// Current balance: the running total of the member's latest entry, or 0.
pub async fn latest_total<C: ConnectionTrait>(conn: &C, member_id: i32) -> Result<i32, DbErr> {
    let latest = point_history::Entity::find()
        .filter(point_history::Column::MemberId.eq(member_id))
        .order_by_desc(point_history::Column::Id)
        .one(conn)
        .await?;
    Ok(latest.map(|entry| entry.total_point).unwrap_or(0))
}

pub async fn append<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    point: i32,
    total_point: i32,
    content: &str,
) -> Result<point_history::Model, DbErr> {
    point_history::ActiveModel {
        member_id: Set(member_id),
        point: Set(point),
        total_point: Set(total_point),
        content: Set(content.to_string()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Newest first.
pub async fn page_by_member<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    page: PageRequest,
) -> Result<(Vec<point_history::Model>, u64), DbErr> {
    let select =
        point_history::Entity::find().filter(point_history::Column::MemberId.eq(member_id));

    let total = select.clone().count(conn).await?;
    let data = select
        .order_by_desc(point_history::Column::Id)
        .offset(Some(page.offset()))
        .limit(Some(page.size))
        .all(conn)
        .await?;

    Ok((data, total))
}
