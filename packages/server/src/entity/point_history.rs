use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only loyalty point ledger entry.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "point_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub member_id: i32,
    #[sea_orm(belongs_to, from = "member_id", to = "id")]
    pub member: HasOne<super::member::Entity>,

    /// Signed amount: credit > 0, debit < 0.
    pub point: i32,
    /// Member balance after this entry.
    pub total_point: i32,
    /// Reason, e.g. "회원 가입".
    pub content: String,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
