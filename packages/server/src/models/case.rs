use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_text};

/// Fields parsed from the multipart case-creation form.
///
/// The optional `file` part is handled separately by the upload store.
#[derive(Default)]
pub struct CreateCaseForm {
    pub query_id: Option<i32>,
    pub case_type: Option<String>,
    pub case_status: Option<String>,
    pub court_date: Option<DateTime<Utc>>,
}

/// Request body for updating a case.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCaseRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub case_type: Option<Option<String>>,
    pub case_status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub court_date: Option<Option<DateTime<Utc>>>,
}

pub fn validate_update_case(payload: &UpdateCaseRequest) -> Result<(), AppError> {
    if let Some(Some(case_type)) = &payload.case_type {
        validate_text(case_type, "case_type", 128)?;
    }
    if let Some(status) = &payload.case_status {
        validate_text(status, "case_status", 64)?;
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CaseResponse {
    pub id: i32,
    pub query_id: i32,
    pub case_type: Option<String>,
    #[schema(example = "Open")]
    pub case_status: String,
    pub court_date: Option<DateTime<Utc>>,
}

impl From<crate::entity::case::Model> for CaseResponse {
    fn from(m: crate::entity::case::Model) -> Self {
        Self {
            id: m.id,
            query_id: m.query_id,
            case_type: m.case_type,
            case_status: m.case_status,
            court_date: m.court_date,
        }
    }
}
