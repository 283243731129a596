use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Placeholder shown for documents created without an attached file.
pub const PLACEHOLDER_FILE_PATH: &str =
    "https://cdn.slidesharecdn.com/ss_thumbnails/legaldocumentsonline-1231237333736279-1-thumbnail.jpg?width=640&height=640&fit=bounds";

/// Prefix marking a `file_path` as a managed upload rather than an external URL.
pub const UPLOADS_PREFIX: &str = "uploads/";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub document_type: Option<String>,
    /// Either `uploads/<stored name>` for managed uploads or an external URL.
    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub file_path: String,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub starred: bool,

    pub case_id: i32,
    #[sea_orm(belongs_to, from = "case_id", to = "id")]
    pub case: HasOne<super::case::Entity>,
}

impl Model {
    /// Stored name of the managed upload backing this document, if any.
    pub fn stored_name(&self) -> Option<&str> {
        self.file_path.strip_prefix(UPLOADS_PREFIX)
    }
}

impl ActiveModelBehavior for ActiveModel {}
