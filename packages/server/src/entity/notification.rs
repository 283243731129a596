use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification type recorded when a bid on the case's query is accepted.
pub const TYPE_BID_ACCEPTED: &str = "BidAccepted";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub notification_type: Option<String>,
    pub content: Option<String>,

    pub case_id: i32,
    #[sea_orm(belongs_to, from = "case_id", to = "id")]
    pub case: HasOne<super::case::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
