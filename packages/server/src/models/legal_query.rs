use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_text;

/// Request body for submitting a legal query.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateLegalQueryRequest {
    /// The client's legal question.
    #[schema(example = "My landlord is refusing to return my security deposit.")]
    pub content: String,
    #[schema(example = "pending")]
    pub status: Option<String>,
}

pub fn validate_create_legal_query(payload: &CreateLegalQueryRequest) -> Result<(), AppError> {
    validate_text(&payload.content, "content", 10_000)?;
    if let Some(status) = &payload.status {
        validate_text(status, "status", 64)?;
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LegalQueryResponse {
    pub id: i32,
    pub content: String,
    pub status: Option<String>,
    /// NULL when the query was submitted anonymously.
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::legal_query::Model> for LegalQueryResponse {
    fn from(m: crate::entity::legal_query::Model) -> Self {
        Self {
            id: m.id,
            content: m.content,
            status: m.status,
            user_id: m.user_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
