use chrono::Utc;
use sea_orm::*;

use crate::entity::product_inquiry_post;
use crate::models::product_inquiry::{InquiryKey, ProductInquiryRequest};
use crate::models::shared::PageRequest;

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    key: InquiryKey,
) -> Result<Option<product_inquiry_post::Model>, DbErr> {
    product_inquiry_post::Entity::find_by_id((key.product_id, key.inquiry_id))
        .one(conn)
        .await
}

/// One past the highest inquiry id used for the product, starting at 1.
/// Callers must hold the product lock from [`super::product::lock_active`].
pub async fn next_inquiry_id<C: ConnectionTrait>(conn: &C, product_id: i32) -> Result<i32, DbErr> {
    let last = product_inquiry_post::Entity::find()
        .filter(product_inquiry_post::Column::ProductId.eq(product_id))
        .order_by_desc(product_inquiry_post::Column::InquiryId)
        .one(conn)
        .await?;
    Ok(last.map(|post| post.inquiry_id + 1).unwrap_or(1))
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    key: InquiryKey,
    member_id: i32,
    req: &ProductInquiryRequest,
) -> Result<product_inquiry_post::Model, DbErr> {
    product_inquiry_post::ActiveModel {
        product_id: Set(key.product_id),
        inquiry_id: Set(key.inquiry_id),
        member_id: Set(member_id),
        title: Set(req.title.trim().to_string()),
        content: Set(req.content.clone()),
        is_secret: Set(req.is_secret),
        admin_reply: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await
}

pub async fn set_reply<C: ConnectionTrait>(
    conn: &C,
    existing: product_inquiry_post::Model,
    reply: &str,
) -> Result<product_inquiry_post::Model, DbErr> {
    let mut active: product_inquiry_post::ActiveModel = existing.into();
    active.admin_reply = Set(Some(reply.to_string()));
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, key: InquiryKey) -> Result<u64, DbErr> {
    let res = product_inquiry_post::Entity::delete_by_id((key.product_id, key.inquiry_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

async fn page<C: ConnectionTrait>(
    conn: &C,
    select: Select<product_inquiry_post::Entity>,
    page: PageRequest,
    order: product_inquiry_post::Column,
) -> Result<(Vec<product_inquiry_post::Model>, u64), DbErr> {
    let total = select.clone().count(conn).await?;
    let data = select
        .order_by_desc(order)
        .order_by_desc(product_inquiry_post::Column::InquiryId)
        .offset(Some(page.offset()))
        .limit(Some(page.size))
        .all(conn)
        .await?;
    Ok((data, total))
}

pub async fn page_by_product<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
    page_req: PageRequest,
) -> Result<(Vec<product_inquiry_post::Model>, u64), DbErr> {
    let select = product_inquiry_post::Entity::find()
        .filter(product_inquiry_post::Column::ProductId.eq(product_id));
    page(conn, select, page_req, product_inquiry_post::Column::InquiryId).await
}

pub async fn page_by_member<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    page_req: PageRequest,
) -> Result<(Vec<product_inquiry_post::Model>, u64), DbErr> {
    let select = product_inquiry_post::Entity::find()
        .filter(product_inquiry_post::Column::MemberId.eq(member_id));
    page(conn, select, page_req, product_inquiry_post::Column::CreatedAt).await
}
