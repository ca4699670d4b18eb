//! Axum route handlers for the achievement collections.
//!
//! Each handler is generic over [`Achievement`] and mounted once per kind, e.g.
//! `get(handle_list::<InternshipRow>)`. All of them are scoped to the
//! authenticated user; other users' records read as not found.

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::achievements::service::{create_achievement, delete_achievement, update_achievement};
use crate::achievements::{store, Achievement};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/v1/{kind}s
pub async fn handle_list<A: Achievement>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<A>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let records = store::list::<A>(&mut conn, user.id).await?;
    Ok(Json(records))
}

/// POST /api/v1/{kind}s
pub async fn handle_create<A: Achievement>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(input): AppJson<A::Input>,
) -> Result<(StatusCode, Json<A>), AppError> {
    let record = create_achievement::<A>(&state.db, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/{kind}s/:id
pub async fn handle_get<A: Achievement>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<A>, AppError> {
    let mut conn = state.db.acquire().await?;
    let record = store::get::<A>(&mut conn, user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", A::KIND.label())))?;
    Ok(Json(record))
}

/// PUT /api/v1/{kind}s/:id
pub async fn handle_replace<A: Achievement>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<A::Input>,
) -> Result<Json<A>, AppError> {
    let record = update_achievement::<A>(&state.db, user.id, id, input, false).await?;
    Ok(Json(record))
}

/// PATCH /api/v1/{kind}s/:id
pub async fn handle_patch<A: Achievement>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<A::Input>,
) -> Result<Json<A>, AppError> {
    let record = update_achievement::<A>(&state.db, user.id, id, input, true).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/{kind}s/:id
pub async fn handle_delete<A: Achievement>(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_achievement::<A>(&state.db, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
