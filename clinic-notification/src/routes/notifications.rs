use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use clinic_shared::errors::{AppError, AppResult, ErrorCode};
use clinic_shared::middleware::AdminUser;
use clinic_shared::types::auth::AuthUser;
use clinic_shared::types::ApiResponse;

use crate::events::changes::ChangeKind;
use crate::models::Notification;
use crate::services::notification_service;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Include already-read rows. Defaults to true: the feed shows
    /// everything, the badge counts only unread.
    pub include_read: Option<bool>,
}

/// GET /notifications — rows visible to the caller, newest first.
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Notification>>>> {
    let include_read = query.include_read.unwrap_or(true);
    let items = notification_service::list_for_user(&state.db, user.id, include_read)?;
    Ok(Json(ApiResponse::ok(items)))
}

/// GET /notifications/unread-count — badge number for the caller.
pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let count = notification_service::count_unread(&state.db, user.id)?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "count": count }))))
}

/// POST /notifications/:id/read — mark one row read, scoped to rows the
/// caller can see.
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    let notification = notification_service::mark_read(&state.db, id, user.id)?;
    state.changes.emit(ChangeKind::Update);
    Ok(Json(ApiResponse::ok(notification)))
}

/// POST /notifications/mark-all-read — one statement over every unread row
/// visible to the caller.
pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let updated = notification_service::mark_all_read(&state.db, user.id)?;
    if updated > 0 {
        state.changes.emit(ChangeKind::Update);
    }
    Ok(Json(ApiResponse::ok(serde_json::json!({ "updated": updated }))))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendNotificationRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub message: String,
    /// Omit for a broadcast visible to every user.
    pub owner_id: Option<Uuid>,
}

/// POST /notifications (admin) — create a broadcast or targeted row.
pub async fn send_notification(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<SendNotificationRequest>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    req.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    let notification =
        notification_service::create_notification(&state.db, &req.title, &req.message, req.owner_id)?;

    state.changes.emit(ChangeKind::Insert);

    Ok(Json(ApiResponse::ok(notification)))
}

/// DELETE /notifications/:id (admin) — idempotent.
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    notification_service::delete_notification(&state.db, id)?;
    state.changes.emit(ChangeKind::Delete);
    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": true }))))
}
