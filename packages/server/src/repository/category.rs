use sea_orm::*;

use crate::entity::{categorization, category, product};

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<Option<category::Model>, DbErr> {
    category::Entity::find_by_id(code.to_string()).one(conn).await
}

pub async fn find_categorization<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<Option<categorization::Model>, DbErr> {
    categorization::Entity::find_by_id(code.to_string())
        .one(conn)
        .await
}

pub async fn all_categorizations<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<categorization::Model>, DbErr> {
    categorization::Entity::find()
        .order_by_asc(categorization::Column::Code)
        .all(conn)
        .await
}

/// Ordered by categorization, then display sequence.
pub async fn all_categories<C: ConnectionTrait>(conn: &C) -> Result<Vec<category::Model>, DbErr> {
    category::Entity::find()
        .order_by_asc(category::Column::CategorizationCode)
        .order_by_asc(category::Column::Sequence)
        .order_by_asc(category::Column::Code)
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    code: &str,
    categorization_code: &str,
    name: &str,
    sequence: i32,
) -> Result<category::Model, DbErr> {
    category::ActiveModel {
        code: Set(code.to_string()),
        categorization_code: Set(categorization_code.to_string()),
        name: Set(name.to_string()),
        sequence: Set(sequence),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    existing: category::Model,
    categorization_code: &str,
    name: &str,
    sequence: i32,
) -> Result<category::Model, DbErr> {
    let mut active: category::ActiveModel = existing.into();
    active.categorization_code = Set(categorization_code.to_string());
    active.name = Set(name.to_string());
    active.sequence = Set(sequence);
    active.update(conn).await
}

/// Products referencing the category, soft-deleted ones included.
pub async fn count_products<C: ConnectionTrait>(conn: &C, code: &str) -> Result<u64, DbErr> {
    product::Entity::find()
        .filter(product::Column::CategoryCode.eq(code))
        .count(conn)
        .await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, code: &str) -> Result<u64, DbErr> {
    let res = category::Entity::delete_by_id(code.to_string())
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
