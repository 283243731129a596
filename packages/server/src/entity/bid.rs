use ewakeel_common::BidStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bid")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub advocate_name: String,
    /// Proposed fee, in the platform currency.
    pub bid_amount: f64,
    pub experience: Option<String>,
    pub timeline: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub strategy: Option<String>,
    pub rating: Option<f64>,
    pub specialization: Option<String>,
    pub status: BidStatus,

    pub query_id: i32,
    #[sea_orm(belongs_to, from = "query_id", to = "id")]
    pub query: HasOne<super::legal_query::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
