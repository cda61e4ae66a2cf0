use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::info;

use crate::entity::categorization;

/// Default categorizations: (code, name, alias).
const DEFAULT_CATEGORIZATIONS: &[(&str, &str, &str)] = &[
    ("100", "상품", "product"),
    ("200", "레시피", "recipe"),
    ("700", "공지사항", "notice"),
];

/// Seed the `categorization` table with defaults. Existing rows are left untouched.
pub async fn seed_categorizations<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &(code, name, alias) in DEFAULT_CATEGORIZATIONS {
        let model = categorization::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            alias: Set(alias.to_string()),
        };

        let result = categorization::Entity::insert(model)
            .on_conflict(
                OnConflict::column(categorization::Column::Code)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(rows) if rows > 0 => inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new categorizations", inserted);
    }

    Ok(())
}
