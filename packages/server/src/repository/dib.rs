use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::entity::{dib, product};
use crate::models::dib::DibResponse;

/// Insert the pair unless it already exists.
pub async fn insert_ignore<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    product_id: i32,
) -> Result<(), DbErr> {
    let model = dib::ActiveModel {
        member_id: Set(member_id),
        product_id: Set(product_id),
        created_at: Set(Utc::now()),
    };

    let result = dib::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([dib::Column::MemberId, dib::Column::ProductId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await;

    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

/// The member's dibs with product name and price, newest first.
pub async fn list_by_member<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
) -> Result<Vec<DibResponse>, DbErr> {
    let dibs = dib::Entity::find()
        .filter(dib::Column::MemberId.eq(member_id))
        .order_by_desc(dib::Column::CreatedAt)
        .all(conn)
        .await?;
    if dibs.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = dibs.iter().map(|d| d.product_id).collect();
    let products: HashMap<i32, product::Model> = product::Entity::find()
        .filter(product::Column::Id.is_in(product_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(dibs
        .into_iter()
        .filter_map(|d| {
            products.get(&d.product_id).map(|p| DibResponse {
                product_id: p.id,
                product_name: p.name.clone(),
                price: p.price,
                created_at: d.created_at,
            })
        })
        .collect())
}

pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    product_id: i32,
) -> Result<u64, DbErr> {
    let res = dib::Entity::delete_by_id((member_id, product_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
