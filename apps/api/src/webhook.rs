//! Third-party achievement ingestion.
//!
//! External platforms post `{user_email, type, data}`; the data is validated
//! exactly like a user-submitted record and the owner's resume is regenerated.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::achievements::service::create_achievement;
use crate::achievements::{Achievement, AchievementKind};
use crate::auth::store as users;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::achievement::{CourseRow, HackathonRow, InternshipRow, ProjectRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: String,
}

/// POST /api/v1/webhook/achievement
pub async fn handle_achievement_webhook(
    State(state): State<AppState>,
    AppJson(payload): AppJson<WebhookPayload>,
) -> Result<(StatusCode, Json<WebhookResponse>), AppError> {
    let user_not_found = || AppError::NotFound("User not found".to_string());

    let email = payload.user_email.ok_or_else(user_not_found)?;
    let user = {
        let mut conn = state.db.acquire().await?;
        users::find_by_email(&mut conn, &email)
            .await?
            .ok_or_else(user_not_found)?
    };

    let kind = payload
        .kind
        .as_deref()
        .and_then(|k| k.parse::<AchievementKind>().ok())
        .ok_or_else(|| {
            warn!("Webhook for {email} rejected: unknown type {:?}", payload.kind);
            AppError::BadRequest("Invalid achievement type".to_string())
        })?;

    let data = payload.data.unwrap_or(Value::Null);
    match kind {
        AchievementKind::Internship => ingest::<InternshipRow>(&state, user.id, data).await?,
        AchievementKind::Course => ingest::<CourseRow>(&state, user.id, data).await?,
        AchievementKind::Hackathon => ingest::<HackathonRow>(&state, user.id, data).await?,
        AchievementKind::Project => ingest::<ProjectRow>(&state, user.id, data).await?,
    }

    info!("Webhook added {} for user {}", kind.as_str(), user.id);
    Ok((
        StatusCode::CREATED,
        Json(WebhookResponse {
            message: format!("{} added successfully", kind.label()),
        }),
    ))
}

async fn ingest<A: Achievement>(
    state: &AppState,
    user_id: uuid::Uuid,
    data: Value,
) -> Result<(), AppError> {
    let input = parse_data::<A>(data)?;
    create_achievement::<A>(&state.db, user_id, input).await?;
    Ok(())
}

/// Missing or null `data` is treated as an empty record so validation can
/// name every required field.
fn parse_data<A: Achievement>(data: Value) -> Result<A::Input, AppError> {
    if data.is_null() {
        return Ok(A::Input::default());
    }
    serde_json::from_value(data)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} data: {e}", A::KIND.as_str())))
}
