//! Axum route handlers for the Resume API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::models::user::{PublicUser, UserRow};
use crate::resume::service::{get_or_create_resume, regenerate_resume};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub user: PublicUser,
    pub resume_data: Value,
    pub last_generated: DateTime<Utc>,
    pub template_type: String,
}

impl ResumeResponse {
    pub fn new(user: &UserRow, row: ResumeRow) -> Self {
        Self {
            user: PublicUser::from(user),
            resume_data: row.resume_data,
            last_generated: row.last_generated,
            template_type: row.template_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub message: &'static str,
    pub resume: ResumeResponse,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ResumeResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    let row = get_or_create_resume(&mut tx, user.id).await?;
    tx.commit().await?;
    Ok(Json(ResumeResponse::new(&user, row)))
}

/// POST /api/v1/resume/regenerate
pub async fn handle_regenerate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<RegenerateResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    let row = regenerate_resume(&mut tx, user.id).await?;
    tx.commit().await?;
    Ok(Json(RegenerateResponse {
        message: "Resume regenerated successfully",
        resume: ResumeResponse::new(&user, row),
    }))
}
