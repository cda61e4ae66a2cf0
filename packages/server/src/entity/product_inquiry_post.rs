use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Keyed by `(product_id, inquiry_id)`; `inquiry_id` counts up per product.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_inquiry_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub inquiry_id: i32,
    #[sea_orm(belongs_to, from = "product_id", to = "id")]
    pub product: HasOne<super::product::Entity>,

    pub member_id: i32,
    #[sea_orm(belongs_to, from = "member_id", to = "id")]
    pub member: HasOne<super::member::Entity>,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub is_secret: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub admin_reply: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
