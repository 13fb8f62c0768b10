use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use clinic_shared::errors::{AppError, AppResult, ErrorCode};
use clinic_shared::types::auth::AuthUser;
use clinic_shared::types::ApiResponse;

use crate::models::User;
use crate::schema::users;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn me(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<MeResponse>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let record = users::table
        .filter(users::id.eq(user.id))
        .first::<User>(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::UserNotFound, "user not found"))?;

    Ok(Json(ApiResponse::ok(MeResponse {
        id: record.id,
        name: record.name,
        email: record.email,
        role: record.role,
        created_at: record.created_at,
    })))
}
