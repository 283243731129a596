use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_text};

/// Request body for attaching a document record to a case.
///
/// `file_path` defaults to a placeholder image when omitted; managed
/// uploads are created through the multipart case endpoint instead.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDocumentRequest {
    #[schema(example = 3)]
    pub case_id: i32,
    #[schema(example = "Affidavit")]
    pub document_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_path: Option<String>,
}

pub fn validate_create_document(payload: &CreateDocumentRequest) -> Result<(), AppError> {
    if let Some(kind) = &payload.document_type {
        validate_text(kind, "document_type", 64)?;
    }
    if let Some(title) = &payload.title {
        validate_text(title, "title", 256)?;
    }
    if let Some(path) = &payload.file_path {
        validate_text(path, "file_path", 500)?;
    }
    Ok(())
}

/// Request body for updating a document record.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateDocumentRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub document_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub file_path: Option<String>,
}

pub fn validate_update_document(payload: &UpdateDocumentRequest) -> Result<(), AppError> {
    if let Some(Some(kind)) = &payload.document_type {
        validate_text(kind, "document_type", 64)?;
    }
    if let Some(Some(title)) = &payload.title {
        validate_text(title, "title", 256)?;
    }
    if let Some(path) = &payload.file_path {
        validate_text(path, "file_path", 500)?;
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DocumentResponse {
    pub id: i32,
    pub case_id: i32,
    pub document_type: Option<String>,
    pub file_path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub starred: bool,
}

impl From<crate::entity::document::Model> for DocumentResponse {
    fn from(m: crate::entity::document::Model) -> Self {
        Self {
            id: m.id,
            case_id: m.case_id,
            document_type: m.document_type,
            file_path: m.file_path,
            title: m.title,
            description: m.description,
            starred: m.starred,
        }
    }
}
