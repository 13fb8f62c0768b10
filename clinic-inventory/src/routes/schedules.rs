use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use clinic_shared::errors::{AppError, AppResult, ErrorCode};
use clinic_shared::middleware::AdminUser;
use clinic_shared::types::auth::AuthUser;
use clinic_shared::types::ApiResponse;

use crate::events::publisher;
use crate::models::{Schedule, ScheduleChanges};
use crate::services::schedule_service;
use crate::AppState;

/// GET /schedules — all schedules, title ascending.
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Schedule>>>> {
    let items = schedule_service::list_schedules(&state.db)?;
    Ok(Json(ApiResponse::ok(items)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "doctor is required"))]
    pub doctor: String,
    #[validate(length(min = 1, message = "day is required"))]
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// POST /schedules (admin) — create; publishes `schedule.created`.
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<CreateScheduleRequest>,
) -> AppResult<Json<ApiResponse<Schedule>>> {
    req.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    let schedule = schedule_service::create_schedule(
        &state.db,
        &req.title,
        &req.doctor,
        &req.day,
        &req.start_time,
        &req.end_time,
    )?;

    publisher::publish_schedule_created(&state.rabbitmq, &schedule).await;

    Ok(Json(ApiResponse::ok(schedule)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateScheduleRequest {
    pub title: Option<String>,
    pub doctor: Option<String>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
}

/// PATCH /schedules/:id (admin) — partial update; publishes
/// `schedule.status_changed` only when the status actually changed.
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateScheduleRequest>,
) -> AppResult<Json<ApiResponse<Schedule>>> {
    let changes = ScheduleChanges {
        title: req.title,
        doctor: req.doctor,
        day: req.day,
        start_time: req.start_time,
        end_time: req.end_time,
        status: req.status,
        ..Default::default()
    };

    let (schedule, status_changed) = schedule_service::update_schedule(&state.db, id, changes)?;

    if status_changed {
        publisher::publish_schedule_status_changed(&state.rabbitmq, &schedule).await;
    }

    Ok(Json(ApiResponse::ok(schedule)))
}

/// DELETE /schedules/:id (admin) — idempotent; publishes
/// `schedule.deleted` only when a row was actually removed.
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let deleted = schedule_service::delete_schedule(&state.db, id)?;

    if let Some(schedule) = deleted {
        publisher::publish_schedule_deleted(&state.rabbitmq, &schedule).await;
    }

    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": true }))))
}
