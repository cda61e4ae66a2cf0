use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,

    pub categorization_code: String,
    #[sea_orm(belongs_to, from = "categorization_code", to = "code")]
    pub categorization: HasOne<super::categorization::Entity>,

    pub name: String,
    pub sequence: i32, // display order within the categorization

    #[sea_orm(has_many)]
    pub products: HasMany<super::product::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
