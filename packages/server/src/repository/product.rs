use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;

use crate::entity::product;
use crate::models::product::{ProductRequest, ProductSummary};
use crate::models::shared::{PageRequest, escape_like};

/// Find by id, soft-deleted products included.
pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find_by_id(id).one(conn).await
}

pub async fn find_active<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find_by_id(id)
        .filter(product::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

/// Like [`find_active`], but holds a row lock (`FOR UPDATE`) until the
/// surrounding transaction ends. SQLite has no row locks and already
/// serializes writers, so the clause is omitted there.
pub async fn lock_active<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find_by_id(id)
        .filter(product::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    asset_id: i32,
    req: &ProductRequest,
) -> Result<product::Model, DbErr> {
    let now = Utc::now();
    let mut active = product::ActiveModel {
        asset_id: Set(asset_id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    apply_request(&mut active, req);
    active.insert(conn).await
}

/// Replace the mutable fields, optionally re-pointing at a new asset.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    existing: product::Model,
    asset_id: Option<i32>,
    req: &ProductRequest,
) -> Result<product::Model, DbErr> {
    let mut active: product::ActiveModel = existing.into();
    if let Some(asset_id) = asset_id {
        active.asset_id = Set(asset_id);
    }
    apply_request(&mut active, req);
    active.updated_at = Set(Utc::now());
    active.update(conn).await
}

fn apply_request(active: &mut product::ActiveModel, req: &ProductRequest) {
    active.category_code = Set(req.category_code.trim().to_string());
    active.name = Set(req.name.trim().to_string());
    active.content = Set(req.content.clone());
    active.total_stock = Set(req.total_stock);
    active.price = Set(req.price);
    active.description = Set(req.description.clone());
    active.unit = Set(req.unit.trim().to_string());
    active.delivery_type = Set(req.delivery_type.trim().to_string());
    active.origin = Set(req.origin.trim().to_string());
    active.package_type = Set(req.package_type.trim().to_string());
    active.expiration_date = Set(req.expiration_date);
    active.allergy_info = Set(req.allergy_info.clone());
    active.capacity = Set(req.capacity.clone());
}

pub async fn soft_delete<C: ConnectionTrait>(
    conn: &C,
    existing: product::Model,
) -> Result<product::Model, DbErr> {
    let now = Utc::now();
    let mut active: product::ActiveModel = existing.into();
    active.deleted_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(conn).await
}

fn summary_select() -> Select<product::Entity> {
    product::Entity::find()
        .select_only()
        .column(product::Column::Id)
        .column(product::Column::CategoryCode)
        .column(product::Column::Name)
        .column(product::Column::Price)
        .column(product::Column::TotalStock)
        .column(product::Column::CreatedAt)
        .filter(product::Column::DeletedAt.is_null())
}

async fn page_summaries<C: ConnectionTrait>(
    conn: &C,
    select: Select<product::Entity>,
    page: PageRequest,
) -> Result<(Vec<ProductSummary>, u64), DbErr> {
    let total = select.clone().count(conn).await?;
    let data = select
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .offset(Some(page.offset()))
        .limit(Some(page.size))
        .into_model::<ProductSummary>()
        .all(conn)
        .await?;
    Ok((data, total))
}

/// Active products, newest first.
pub async fn page_active<C: ConnectionTrait>(
    conn: &C,
    page: PageRequest,
) -> Result<(Vec<ProductSummary>, u64), DbErr> {
    page_summaries(conn, summary_select(), page).await
}

pub async fn page_active_by_category<C: ConnectionTrait>(
    conn: &C,
    category_code: &str,
    page: PageRequest,
) -> Result<(Vec<ProductSummary>, u64), DbErr> {
    let select = summary_select().filter(product::Column::CategoryCode.eq(category_code));
    page_summaries(conn, select, page).await
}

/// Case-insensitive LIKE search on the name, newest first.
pub async fn search_by_name<C: ConnectionTrait>(
    conn: &C,
    keyword: &str,
) -> Result<Vec<ProductSummary>, DbErr> {
    let term = escape_like(keyword.trim());
    if term.is_empty() {
        return Ok(Vec::new());
    }

    summary_select()
        .filter(
            Expr::expr(Func::lower(Expr::col(product::Column::Name)))
                .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
        )
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .into_model::<ProductSummary>()
        .all(conn)
        .await
}

pub async fn active_summaries<C: ConnectionTrait>(conn: &C) -> Result<Vec<ProductSummary>, DbErr> {
    summary_select()
        .order_by_asc(product::Column::Id)
        .into_model::<ProductSummary>()
        .all(conn)
        .await
}
