use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use ewakeel_common::storage::{BoxReader, StoredUpload, UploadStore};
use sea_orm::sea_query::LockType;
use sea_orm::*;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{case, document, legal_query, notification};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::case::{CaseResponse, CreateCaseForm, UpdateCaseRequest, validate_update_case};
use crate::models::notification::{
    CreateNotificationRequest, NotificationResponse, validate_create_notification,
};
use crate::state::AppState;

pub fn case_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024) // 32 MB
}

/// List all cases.
#[utoipa::path(
    get,
    path = "/",
    tag = "Cases",
    operation_id = "listCases",
    responses(
        (status = 200, description = "All cases", body = [CaseResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_cases(State(state): State<AppState>) -> Result<Json<Vec<CaseResponse>>, AppError> {
    let cases = case::Entity::find()
        .order_by_desc(case::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(cases.into_iter().map(Into::into).collect()))
}

/// Open a case for a legal query.
///
/// Accepts `multipart/form-data` with a required `query_id` field,
/// optional `case_type`, `case_status` and `court_date` (RFC 3339)
/// fields, and an optional `file` part. When a file is supplied it is
/// stored and attached to the case as its first document.
#[utoipa::path(
    post,
    path = "/",
    tag = "Cases",
    operation_id = "createCase",
    request_body(content_type = "multipart/form-data", description = "Case fields with optional file"),
    responses(
        (status = 201, description = "Case created", body = CaseResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Legal query not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Query already has a case (CONFLICT)", body = ErrorBody),
        (status = 413, description = "File too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_case(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut raw_query_id: Option<String> = None;
    let mut raw_court_date: Option<String> = None;
    let mut form = CreateCaseForm::default();
    let mut temp_upload: Option<TempUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("query_id") => {
                raw_query_id = Some(read_text_field(field, "query_id").await?);
            }
            Some("case_type") => {
                form.case_type = Some(read_text_field(field, "case_type").await?);
            }
            Some("case_status") => {
                form.case_status = Some(read_text_field(field, "case_status").await?);
            }
            Some("court_date") => {
                raw_court_date = Some(read_text_field(field, "court_date").await?);
            }
            Some("file") => {
                temp_upload = Some(spool_field_to_temp(field).await?);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    // Parse text fields before touching the upload store, so a bad form
    // never leaves an orphaned file behind.
    let query_id = raw_query_id
        .ok_or_else(|| AppError::Validation("Missing 'query_id' field".into()))?
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation("query_id must be an integer".into()))?;
    form.query_id = Some(query_id);

    if let Some(text) = raw_court_date {
        let parsed = DateTime::parse_from_rfc3339(text.trim()).map_err(|_| {
            AppError::Validation("court_date must be an RFC 3339 timestamp".into())
        })?;
        form.court_date = Some(parsed.with_timezone(&Utc));
    }

    let mut upload: Option<StoredUpload> = None;
    let mut original_name: Option<String> = None;
    if let Some(temp) = &temp_upload {
        original_name = temp.original_name.clone();
        upload = Some(temp.store_into(&*state.uploads).await?);
    }

    let result = persist_case(&state, query_id, form, upload.as_ref(), original_name).await;

    if result.is_err()
        && let Some(stored) = &upload
    {
        // The row never landed, so the stored file is orphaned.
        let _ = state.uploads.delete(&stored.stored_name).await;
    }

    let case = result?;
    Ok((StatusCode::CREATED, Json(CaseResponse::from(case))))
}

async fn persist_case(
    state: &AppState,
    query_id: i32,
    form: CreateCaseForm,
    upload: Option<&StoredUpload>,
    original_name: Option<String>,
) -> Result<case::Model, AppError> {
    let txn = state.db.begin().await?;

    legal_query::Entity::find_by_id(query_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Legal query not found".into()))?;

    let existing = case::Entity::find()
        .filter(case::Column::QueryId.eq(query_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Query already has a case".into()));
    }

    let case = case::ActiveModel {
        query_id: Set(query_id),
        case_type: Set(form.case_type),
        case_status: Set(form
            .case_status
            .unwrap_or_else(|| case::DEFAULT_STATUS.to_string())),
        court_date: Set(form.court_date),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(stored) = upload {
        let document_type = stored
            .stored_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string());
        document::ActiveModel {
            case_id: Set(case.id),
            document_type: Set(document_type),
            file_path: Set(format!("{}{}", document::UPLOADS_PREFIX, stored.stored_name)),
            title: Set(original_name),
            starred: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(case)
}

/// Fetch a single case.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Cases",
    operation_id = "getCase",
    params(("id" = i32, Path, description = "Case ID")),
    responses(
        (status = 200, description = "The case", body = CaseResponse),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CaseResponse>, AppError> {
    let case = find_case(&state.db, id).await?;
    Ok(Json(CaseResponse::from(case)))
}

/// Update a case.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Cases",
    operation_id = "updateCase",
    params(("id" = i32, Path, description = "Case ID")),
    responses(
        (status = 200, description = "Updated case", body = CaseResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCaseRequest>,
) -> Result<Json<CaseResponse>, AppError> {
    validate_update_case(&payload)?;

    let case = find_case(&state.db, id).await?;
    let mut active: case::ActiveModel = case.into();

    if let Some(case_type) = payload.case_type {
        active.case_type = Set(case_type);
    }
    if let Some(status) = payload.case_status {
        active.case_status = Set(status.trim().to_string());
    }
    if let Some(court_date) = payload.court_date {
        active.court_date = Set(court_date);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(CaseResponse::from(updated)))
}

/// Close out and delete a case along with its documents and
/// notifications. Managed upload files are removed after the rows.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Cases",
    operation_id = "deleteCase",
    params(("id" = i32, Path, description = "Case ID")),
    responses(
        (status = 204, description = "Case deleted"),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_case(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let case = case::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Case not found".into()))?;

    let documents = document::Entity::find()
        .filter(document::Column::CaseId.eq(case.id))
        .all(&txn)
        .await?;

    document::Entity::delete_many()
        .filter(document::Column::CaseId.eq(case.id))
        .exec(&txn)
        .await?;
    notification::Entity::delete_many()
        .filter(notification::Column::CaseId.eq(case.id))
        .exec(&txn)
        .await?;
    case::Entity::delete_by_id(case.id).exec(&txn).await?;

    txn.commit().await?;

    // Best effort; orphaned files are harmless.
    for doc in &documents {
        if let Some(stored_name) = doc.stored_name() {
            let _ = state.uploads.delete(stored_name).await;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List notifications recorded on a case, newest first.
#[utoipa::path(
    get,
    path = "/{id}/notifications",
    tag = "Cases",
    operation_id = "listCaseNotifications",
    params(("id" = i32, Path, description = "Case ID")),
    responses(
        (status = 200, description = "Case notifications", body = [NotificationResponse]),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    find_case(&state.db, id).await?;

    let notifications = notification::Entity::find()
        .filter(notification::Column::CaseId.eq(id))
        .order_by_desc(notification::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

/// Record a notification on a case.
#[utoipa::path(
    post,
    path = "/{id}/notifications",
    tag = "Cases",
    operation_id = "createCaseNotification",
    params(("id" = i32, Path, description = "Case ID")),
    responses(
        (status = 201, description = "Notification created", body = NotificationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_notification(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CreateNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_notification(&payload)?;
    find_case(&state.db, id).await?;

    let now = chrono::Utc::now();
    let notification = notification::ActiveModel {
        case_id: Set(id),
        notification_type: Set(payload.notification_type),
        content: Set(payload.content),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse::from(notification)),
    ))
}

async fn find_case<C: ConnectionTrait>(db: &C, id: i32) -> Result<case::Model, AppError> {
    case::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Case not found".into()))
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))
}

/// A multipart file field spooled to a temp file, pending storage.
struct TempUpload {
    path: std::path::PathBuf,
    original_name: Option<String>,
}

impl TempUpload {
    async fn store_into(&self, uploads: &dyn UploadStore) -> Result<StoredUpload, AppError> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        let stored = uploads
            .put_stream(self.original_name.as_deref().unwrap_or("upload"), reader)
            .await?;
        Ok(stored)
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        // Best effort.
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Spool a multipart file field to a temp file.
async fn spool_field_to_temp(
    mut field: axum::extract::multipart::Field<'_>,
) -> Result<TempUpload, AppError> {
    let original_name = field.file_name().map(|s| s.to_string());
    let path = std::env::temp_dir().join(format!("ewakeel-upload-{}", Uuid::new_v4()));
    let temp = TempUpload {
        path,
        original_name,
    };

    let mut temp_file = tokio::fs::File::create(&temp.path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        temp_file
            .write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
    }

    temp_file
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;

    Ok(temp)
}
