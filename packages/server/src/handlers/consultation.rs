use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::consultation::{
    ConsultationRequest, ConsultationResponse, validate_consultation_request,
};
use crate::state::AppState;

/// Ask the AI provider for legal advice. Stateless: no conversation
/// history is kept server-side.
#[utoipa::path(
    post,
    path = "/",
    tag = "Consultation",
    operation_id = "consult",
    responses(
        (status = 200, description = "Provider reply", body = ConsultationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Provider failure (UPSTREAM_ERROR)", body = ErrorBody),
        (status = 503, description = "Consultation disabled (ADVICE_DISABLED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn consult(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ConsultationRequest>,
) -> Result<Json<ConsultationResponse>, AppError> {
    validate_consultation_request(&payload)?;

    let reply = state.advice.generate(payload.message.trim()).await?;

    Ok(Json(ConsultationResponse { reply }))
}
