use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub asset_id: i32,
    #[sea_orm(belongs_to, from = "asset_id", to = "id")]
    pub asset: HasOne<super::asset::Entity>,

    /// Blob store path (`{shard}/{rest}` of the content hash).
    pub image_address: String,

    /// Original upload filename.
    pub name: String,
    pub content_type: Option<String>,
    pub size: i64,

    /// Position within the asset, starting at 1.
    pub sequence: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
