use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::entity::member;

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<member::Model>, DbErr> {
    member::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_uuid<C: ConnectionTrait>(
    conn: &C,
    uuid: &str,
) -> Result<Option<member::Model>, DbErr> {
    member::Entity::find()
        .filter(member::Column::Uuid.eq(uuid))
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    uuid: &str,
    referrer_id: Option<i32>,
) -> Result<member::Model, DbErr> {
    let now = Utc::now();
    member::ActiveModel {
        uuid: Set(uuid.to_string()),
        referrer_id: Set(referrer_id),
        ggpass_updated_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn set_ggpass_updated_at<C: ConnectionTrait>(
    conn: &C,
    existing: member::Model,
    at: Option<DateTime<Utc>>,
) -> Result<member::Model, DbErr> {
    let mut active: member::ActiveModel = existing.into();
    active.ggpass_updated_at = Set(at);
    active.updated_at = Set(Utc::now());
    active.update(conn).await
}
