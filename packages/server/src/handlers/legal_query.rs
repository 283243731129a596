use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::legal_query;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::MaybeAuthUser;
use crate::extractors::json::AppJson;
use crate::models::legal_query::{
    CreateLegalQueryRequest, LegalQueryResponse, validate_create_legal_query,
};
use crate::state::AppState;

/// List all legal queries, newest first.
#[utoipa::path(
    get,
    path = "/",
    tag = "Legal Queries",
    operation_id = "listLegalQueries",
    responses(
        (status = 200, description = "All legal queries", body = [LegalQueryResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_queries(
    State(state): State<AppState>,
) -> Result<Json<Vec<LegalQueryResponse>>, AppError> {
    let queries = legal_query::Entity::find()
        .order_by_desc(legal_query::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(queries.into_iter().map(Into::into).collect()))
}

/// Submit a legal query. Works with or without authentication; when a
/// valid token is supplied the query is attributed to that user.
#[utoipa::path(
    post,
    path = "/",
    tag = "Legal Queries",
    operation_id = "createLegalQuery",
    responses(
        (status = 201, description = "Query created", body = LegalQueryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth, payload))]
pub async fn create_query(
    State(state): State<AppState>,
    MaybeAuthUser(auth): MaybeAuthUser,
    AppJson(payload): AppJson<CreateLegalQueryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_legal_query(&payload)?;

    let now = chrono::Utc::now();
    let query = legal_query::ActiveModel {
        content: Set(payload.content.trim().to_string()),
        status: Set(payload.status),
        user_id: Set(auth.map(|u| u.user_id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(LegalQueryResponse::from(query))))
}
