use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub asset_id: i32,
    #[sea_orm(belongs_to, from = "asset_id", to = "id")]
    pub asset: HasOne<super::asset::Entity>,

    pub category_code: String,
    #[sea_orm(belongs_to, from = "category_code", to = "code")]
    pub category: HasOne<super::category::Entity>,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub total_stock: i64,
    pub price: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub unit: String,
    pub delivery_type: String,
    pub origin: String,
    pub package_type: String,
    pub expiration_date: Option<Date>,
    pub allergy_info: Option<String>,
    pub capacity: Option<String>,

    #[sea_orm(has_many)]
    pub reviews: HasMany<super::review::Entity>,

    #[sea_orm(has_many)]
    pub inquiries: HasMany<super::product_inquiry_post::Entity>,

    #[sea_orm(has_many)]
    pub dibs: HasMany<super::dib::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,

    /// Soft-delete marker. `None` means the product is active.
    pub deleted_at: Option<DateTimeUtc>,
}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl ActiveModelBehavior for ActiveModel {}
