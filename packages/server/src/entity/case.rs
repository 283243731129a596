use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The status assigned to newly opened cases.
pub const DEFAULT_STATUS: &str = "Open";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "case")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub case_type: Option<String>,
    pub case_status: String,
    pub court_date: Option<DateTimeUtc>,

    pub query_id: i32,
    #[sea_orm(belongs_to, from = "query_id", to = "id")]
    pub query: HasOne<super::legal_query::Entity>,

    #[sea_orm(has_many)]
    pub documents: HasMany<super::document::Entity>,

    #[sea_orm(has_many)]
    pub notifications: HasMany<super::notification::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
