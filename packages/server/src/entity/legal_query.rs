use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "legal_query")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The client's legal question, in free text.
    pub content: String,
    pub status: Option<String>,

    /// NULL for queries submitted anonymously.
    pub user_id: Option<i32>,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: BelongsTo<Option<super::user::Entity>>,

    #[sea_orm(has_one)]
    pub case: HasOne<super::case::Entity>,

    #[sea_orm(has_many)]
    pub bids: HasMany<super::bid::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
