use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level grouping above categories (e.g. "100" products, "700" notices).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categorization")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,

    pub name: String,
    pub alias: String,

    #[sea_orm(has_many)]
    pub categories: HasMany<super::category::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
