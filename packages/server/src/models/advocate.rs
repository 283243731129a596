use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_text;

/// Request body for registering an advocate in the directory.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateAdvocateRequest {
    #[schema(example = "Ayesha Khan")]
    pub name: String,
    #[schema(example = "Family Law")]
    pub specialty: Option<String>,
    #[schema(example = "ayesha.khan@example.com")]
    pub contact_info: Option<String>,
}

pub fn validate_create_advocate(payload: &CreateAdvocateRequest) -> Result<(), AppError> {
    validate_text(&payload.name, "name", 128)?;
    if let Some(specialty) = &payload.specialty {
        validate_text(specialty, "specialty", 128)?;
    }
    if let Some(contact) = &payload.contact_info {
        validate_text(contact, "contact_info", 256)?;
    }
    Ok(())
}

/// A directory entry for an advocate.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdvocateResponse {
    pub id: i32,
    pub name: String,
    pub specialty: Option<String>,
    pub contact_info: Option<String>,
}

impl From<crate::entity::advocate::Model> for AdvocateResponse {
    fn from(m: crate::entity::advocate::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            specialty: m.specialty,
            contact_info: m.contact_info,
        }
    }
}
