use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::profile::ProfileRow;
use crate::models::user::{PublicUser, UserRow};
use crate::profile::{store, ProfileInput};
use crate::resume::service::regenerate_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
    #[serde(flatten)]
    pub profile: ProfileRow,
}

impl ProfileResponse {
    fn new(user: &UserRow, profile: ProfileRow) -> Self {
        Self {
            user: PublicUser::from(user),
            profile,
        }
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut conn = state.db.acquire().await?;
    let profile = store::get_or_create(&mut conn, user.id).await?;
    Ok(Json(ProfileResponse::new(&user, profile)))
}

/// PUT /api/v1/profile
/// Omitted fields are cleared.
pub async fn handle_replace_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(input): AppJson<ProfileInput>,
) -> Result<Json<ProfileResponse>, AppError> {
    save_profile(&state, &user, input, false).await
}

/// PATCH /api/v1/profile
/// Omitted fields keep their stored values.
pub async fn handle_patch_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(input): AppJson<ProfileInput>,
) -> Result<Json<ProfileResponse>, AppError> {
    save_profile(&state, &user, input, true).await
}

async fn save_profile(
    state: &AppState,
    user: &UserRow,
    input: ProfileInput,
    partial: bool,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut tx = state.db.begin().await?;
    let input = if partial {
        let stored = store::get_or_create(&mut tx, user.id).await?;
        input.or_stored(&stored)
    } else {
        input
    };
    let new = input.validate()?;

    let profile = store::update(&mut tx, user.id, &new).await?;
    // Contact details feed the resume header.
    regenerate_resume(&mut tx, user.id).await?;
    tx.commit().await?;

    Ok(Json(ProfileResponse::new(user, profile)))
}
