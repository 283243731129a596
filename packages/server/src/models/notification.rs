use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_text;

/// Request body for posting a notification on a case.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateNotificationRequest {
    #[schema(example = "HearingScheduled")]
    pub notification_type: Option<String>,
    #[schema(example = "Hearing scheduled for 2026-09-14")]
    pub content: Option<String>,
}

pub fn validate_create_notification(payload: &CreateNotificationRequest) -> Result<(), AppError> {
    if let Some(kind) = &payload.notification_type {
        validate_text(kind, "notification_type", 64)?;
    }
    if let Some(content) = &payload.content {
        validate_text(content, "content", 2000)?;
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub case_id: i32,
    pub notification_type: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::notification::Model> for NotificationResponse {
    fn from(m: crate::entity::notification::Model) -> Self {
        Self {
            id: m.id,
            case_id: m.case_id,
            notification_type: m.notification_type,
            content: m.content,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
