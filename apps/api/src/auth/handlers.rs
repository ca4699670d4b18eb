//! Axum route handlers for registration, login and token refresh.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::tokens::{TokenPair, TokenType};
use crate::auth::{store, RegisterInput};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::user::PublicUser;
use crate::profile::store as profiles;
use crate::resume::service::regenerate_resume;
use crate::state::AppState;
use crate::validation::{FieldErrors, REQUIRED};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: PublicUser,
    pub tokens: TokenPair,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// POST /api/v1/auth/register
///
/// Creates the user together with an empty profile and a freshly generated
/// resume, all in one transaction.
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let new = input.validate()?;
    let password_hash = hash_password_blocking(new.password.clone()).await?;

    let mut tx = state.db.begin().await?;
    let user = store::insert(&mut tx, &new, &password_hash).await?;
    profiles::get_or_create(&mut tx, user.id).await?;
    regenerate_resume(&mut tx, user.id).await?;
    tx.commit().await?;

    info!("Registered user {} ({})", user.username, user.id);

    let tokens = state.tokens.issue_pair(user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            user: PublicUser::from(&user),
            tokens,
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::InvalidCredentials);
    };

    let mut conn = state.db.acquire().await?;
    let user = store::find_by_username(&mut conn, &username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;
    drop(conn);

    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let tokens = state.tokens.issue_pair(user.id)?;
    Ok(Json(AuthResponse {
        message: "Login successful",
        user: PublicUser::from(&user),
        tokens,
    }))
}

/// POST /api/v1/auth/token/refresh
pub async fn handle_refresh(
    State(state): State<AppState>,
    AppJson(req): AppJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let refresh = req
        .refresh
        .filter(|t| !t.is_empty())
        .ok_or_else(|| FieldErrors::single("refresh", REQUIRED))?;

    let claims = state.tokens.verify(&refresh, TokenType::Refresh)?;
    let access = state.tokens.issue(claims.sub, TokenType::Access)?;
    Ok(Json(RefreshResponse { access }))
}
