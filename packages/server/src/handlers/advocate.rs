use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::advocate;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::advocate::{AdvocateResponse, CreateAdvocateRequest, validate_create_advocate};
use crate::state::AppState;

/// List the advocate directory.
#[utoipa::path(
    get,
    path = "/",
    tag = "Advocates",
    operation_id = "listAdvocates",
    responses(
        (status = 200, description = "All advocates", body = [AdvocateResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_advocates(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdvocateResponse>>, AppError> {
    let advocates = advocate::Entity::find()
        .order_by_asc(advocate::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(advocates.into_iter().map(Into::into).collect()))
}

/// Register an advocate in the directory.
#[utoipa::path(
    post,
    path = "/",
    tag = "Advocates",
    operation_id = "createAdvocate",
    responses(
        (status = 201, description = "Advocate created", body = AdvocateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_advocate(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAdvocateRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_advocate(&payload)?;

    let advocate = advocate::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        specialty: Set(payload.specialty),
        contact_info: Set(payload.contact_info),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(AdvocateResponse::from(advocate))))
}
