use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// Bids carry the advocate's display name rather than a foreign key,
// so this entity has no relation to `bid`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advocate")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub specialty: Option<String>,
    pub contact_info: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
