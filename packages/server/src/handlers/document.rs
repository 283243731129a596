use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::*;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::entity::{case, document};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::document::{
    CreateDocumentRequest, DocumentResponse, UpdateDocumentRequest, validate_create_document,
    validate_update_document,
};
use crate::state::AppState;

/// Query-string filters for listing documents.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListDocumentsQuery {
    /// Restrict to documents of one case.
    pub case_id: Option<i32>,
}

/// List documents, optionally filtered by case.
#[utoipa::path(
    get,
    path = "/",
    tag = "Documents",
    operation_id = "listDocuments",
    params(ListDocumentsQuery),
    responses(
        (status = 200, description = "Matching documents", body = [DocumentResponse]),
    ),
)]
#[instrument(skip(state, params))]
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListDocumentsQuery>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let mut select = document::Entity::find();
    if let Some(case_id) = params.case_id {
        select = select.filter(document::Column::CaseId.eq(case_id));
    }

    let documents = select
        .order_by_desc(document::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

/// Attach a document record to a case.
#[utoipa::path(
    post,
    path = "/",
    tag = "Documents",
    operation_id = "createDocument",
    responses(
        (status = 201, description = "Document created", body = DocumentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(case_id = payload.case_id))]
pub async fn create_document(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDocumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_document(&payload)?;

    case::Entity::find_by_id(payload.case_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Case not found".into()))?;

    let document = document::ActiveModel {
        case_id: Set(payload.case_id),
        document_type: Set(payload.document_type),
        file_path: Set(payload
            .file_path
            .unwrap_or_else(|| document::PLACEHOLDER_FILE_PATH.to_string())),
        title: Set(payload.title),
        description: Set(payload.description),
        starred: Set(false),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

/// Fetch a single document record.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Documents",
    operation_id = "getDocument",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "The document", body = DocumentResponse),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = find_document(&state.db, id).await?;
    Ok(Json(DocumentResponse::from(document)))
}

/// Update a document record.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Documents",
    operation_id = "updateDocument",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Updated document", body = DocumentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateDocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    validate_update_document(&payload)?;

    let document = find_document(&state.db, id).await?;
    let mut active: document::ActiveModel = document.into();

    if let Some(document_type) = payload.document_type {
        active.document_type = Set(document_type);
    }
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(file_path) = payload.file_path {
        active.file_path = Set(file_path);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(DocumentResponse::from(updated)))
}

/// Delete a document record and its stored file, if managed.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Documents",
    operation_id = "deleteDocument",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let document = find_document(&state.db, id).await?;

    document::Entity::delete_by_id(id).exec(&state.db).await?;

    // Best effort; orphaned files are harmless.
    if let Some(stored_name) = document.stored_name() {
        let _ = state.uploads.delete(stored_name).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Flip a document's starred flag.
#[utoipa::path(
    put,
    path = "/{id}/toggle-star",
    tag = "Documents",
    operation_id = "toggleDocumentStar",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Updated document", body = DocumentResponse),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn toggle_star(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = find_document(&state.db, id).await?;
    let starred = document.starred;

    let mut active: document::ActiveModel = document.into();
    active.starred = Set(!starred);

    let updated = active.update(&state.db).await?;
    Ok(Json(DocumentResponse::from(updated)))
}

/// Stream a managed document file. Documents whose `file_path` points
/// at an external URL have no stored content and return 404.
#[utoipa::path(
    get,
    path = "/{id}/download",
    tag = "Documents",
    operation_id = "downloadDocument",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document content"),
        (status = 404, description = "Document or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let document = find_document(&state.db, id).await?;

    let stored_name = document
        .stored_name()
        .ok_or_else(|| AppError::NotFound("Document has no stored file".into()))?;

    let size = state.uploads.size(stored_name).await?;
    let reader = state.uploads.get_stream(stored_name).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = mime_guess::from_path(stored_name)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let download_name = document
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(stored_name);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(download_name),
        )
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

async fn find_document<C: ConnectionTrait>(db: &C, id: i32) -> Result<document::Model, AppError> {
    document::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".into()))
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
