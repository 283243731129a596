use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_text;

/// Request body for the AI consultation endpoint.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ConsultationRequest {
    /// The user's legal question.
    #[schema(example = "What are tenant rights regarding security deposits?")]
    pub message: String,
}

pub fn validate_consultation_request(payload: &ConsultationRequest) -> Result<(), AppError> {
    validate_text(&payload.message, "message", 8000)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ConsultationResponse {
    /// The provider's answer.
    pub reply: String,
}
