use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use clinic_shared::errors::{AppError, AppResult, ErrorCode};
use clinic_shared::types::auth::{AuthSession, UserRole};
use clinic_shared::types::ApiResponse;

use crate::models::User;
use crate::schema::users;
use crate::services::{auth_service, token_service};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/admin/login — admin portal. Non-admin accounts are rejected.
pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<Json<ApiResponse<AuthSession>>> {
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let user: User = users::table
        .filter(users::email.eq(req.email.to_lowercase()))
        .first(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::InvalidCredentials, "invalid email or password"))?;

    let valid = auth_service::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::new(ErrorCode::InvalidCredentials, "invalid email or password"));
    }

    let role = user.role.parse::<UserRole>().unwrap_or(UserRole::User);
    if role != UserRole::Admin {
        return Err(AppError::new(
            ErrorCode::WrongLoginPortal,
            "this portal is for administrators",
        ));
    }

    let session = token_service::create_session(
        user.id,
        role,
        &state.config.jwt_secret,
        state.config.jwt_access_ttl,
    )?;

    tracing::info!(user_id = %user.id, "admin logged in");

    Ok(Json(ApiResponse::ok(session)))
}
