use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Identity issued by the upstream auth service (`AUTH-ID`).
    #[sea_orm(unique)]
    pub uuid: String,

    /// Member who referred this one at signup.
    pub referrer_id: Option<i32>,

    /// Last GG pass renewal. `None` means not subscribed.
    pub ggpass_updated_at: Option<DateTimeUtc>,

    #[sea_orm(has_many)]
    pub point_histories: HasMany<super::point_history::Entity>,

    #[sea_orm(has_many)]
    pub reviews: HasMany<super::review::Entity>,

    #[sea_orm(has_many)]
    pub dibs: HasMany<super::dib::Entity>,

    #[sea_orm(has_many)]
    pub product_inquiry_posts: HasMany<super::product_inquiry_post::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
