use chrono::Utc;
use sea_orm::*;

use crate::entity::review;
use crate::models::review::ReviewResponse;
use crate::models::shared::PageRequest;

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<review::Model>, DbErr> {
    review::Entity::find_by_id(id).one(conn).await
}

fn projection() -> Select<review::Entity> {
    review::Entity::find()
        .select_only()
        .column(review::Column::Id)
        .column(review::Column::ProductId)
        .column(review::Column::MemberId)
        .column(review::Column::AssetId)
        .column(review::Column::Content)
        .column(review::Column::Rating)
        .column(review::Column::IsApproved)
        .column(review::Column::CreatedAt)
        .column(review::Column::UpdatedAt)
}

pub async fn find_projection<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<ReviewResponse>, DbErr> {
    projection()
        .filter(review::Column::Id.eq(id))
        .into_model::<ReviewResponse>()
        .one(conn)
        .await
}

/// Reviews of one product, newest first.
pub async fn page_by_product<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
    page: PageRequest,
) -> Result<(Vec<ReviewResponse>, u64), DbErr> {
    let select = projection().filter(review::Column::ProductId.eq(product_id));

    let total = select.clone().count(conn).await?;
    let data = select
        .order_by_desc(review::Column::Id)
        .offset(Some(page.offset()))
        .limit(Some(page.size))
        .into_model::<ReviewResponse>()
        .all(conn)
        .await?;

    Ok((data, total))
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
    member_id: i32,
    asset_id: i32,
    content: &str,
    rating: i32,
) -> Result<review::Model, DbErr> {
    let now = Utc::now();
    review::ActiveModel {
        product_id: Set(product_id),
        member_id: Set(member_id),
        asset_id: Set(asset_id),
        content: Set(content.to_string()),
        rating: Set(rating),
        is_approved: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    existing: review::Model,
    asset_id: Option<i32>,
    content: &str,
    rating: i32,
) -> Result<review::Model, DbErr> {
    let mut active: review::ActiveModel = existing.into();
    if let Some(asset_id) = asset_id {
        active.asset_id = Set(asset_id);
    }
    active.content = Set(content.to_string());
    active.rating = Set(rating);
    active.updated_at = Set(Utc::now());
    active.update(conn).await
}

pub async fn set_approved<C: ConnectionTrait>(
    conn: &C,
    existing: review::Model,
    approved: bool,
) -> Result<review::Model, DbErr> {
    let mut active: review::ActiveModel = existing.into();
    active.is_approved = Set(approved);
    active.updated_at = Set(Utc::now());
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, DbErr> {
    Ok(review::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
}
