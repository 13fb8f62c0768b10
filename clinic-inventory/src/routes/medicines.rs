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
use crate::models::{Medicine, MedicineChanges};
use crate::services::medicine_service;
use crate::AppState;

/// GET /medicines — all medicines, name ascending.
pub async fn list_medicines(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Medicine>>>> {
    let items = medicine_service::list_medicines(&state.db)?;
    Ok(Json(ApiResponse::ok(items)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMedicineRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    pub quantity: i32,
}

/// POST /medicines (admin) — create; publishes `medicine.created`.
pub async fn create_medicine(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(req): Json<CreateMedicineRequest>,
) -> AppResult<Json<ApiResponse<Medicine>>> {
    req.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    let medicine =
        medicine_service::create_medicine(&state.db, &req.name, &req.category, req.quantity)?;

    publisher::publish_medicine_created(&state.rabbitmq, &medicine).await;

    Ok(Json(ApiResponse::ok(medicine)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMedicineRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
}

/// PATCH /medicines/:id (admin) — partial update; publishes
/// `medicine.status_changed` only when the stock status actually changed.
pub async fn update_medicine(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMedicineRequest>,
) -> AppResult<Json<ApiResponse<Medicine>>> {
    let changes = MedicineChanges {
        name: req.name,
        category: req.category,
        quantity: req.quantity,
        ..Default::default()
    };

    let (medicine, status_changed) = medicine_service::update_medicine(&state.db, id, changes)?;

    if status_changed {
        publisher::publish_medicine_status_changed(&state.rabbitmq, &medicine).await;
    }

    Ok(Json(ApiResponse::ok(medicine)))
}

/// DELETE /medicines/:id (admin) — idempotent; publishes
/// `medicine.deleted` only when a row was actually removed.
pub async fn delete_medicine(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let deleted = medicine_service::delete_medicine(&state.db, id)?;

    if let Some(medicine) = deleted {
        publisher::publish_medicine_deleted(&state.rabbitmq, &medicine).await;
    }

    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": true }))))
}
