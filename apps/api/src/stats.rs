use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::achievements::store::count;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::achievement::{CourseRow, HackathonRow, InternshipRow, ProjectRow};
use crate::models::profile::ProfileRow;
use crate::models::user::UserRow;
use crate::profile::store as profiles;
use crate::resume::service::get_or_create_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_internships: i64,
    pub total_courses: i64,
    pub total_hackathons: i64,
    pub total_projects: i64,
    pub total_skills: usize,
    pub resume_last_updated: DateTime<Utc>,
    pub has_complete_profile: bool,
}

/// A profile is complete once name, email and phone are all filled in.
pub fn has_complete_profile(user: &UserRow, profile: &ProfileRow) -> bool {
    [
        &user.first_name,
        &user.last_name,
        &user.email,
        &profile.phone,
    ]
    .iter()
    .all(|field| !field.trim().is_empty())
}

/// GET /api/v1/dashboard/stats
pub async fn handle_dashboard_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<DashboardStats>, AppError> {
    let mut tx = state.db.begin().await?;

    let resume = get_or_create_resume(&mut tx, user.id).await?;
    let profile = profiles::get_or_create(&mut tx, user.id).await?;

    let stats = DashboardStats {
        total_internships: count::<InternshipRow>(&mut tx, user.id).await?,
        total_courses: count::<CourseRow>(&mut tx, user.id).await?,
        total_hackathons: count::<HackathonRow>(&mut tx, user.id).await?,
        total_projects: count::<ProjectRow>(&mut tx, user.id).await?,
        total_skills: resume.skill_count(),
        resume_last_updated: resume.last_generated,
        has_complete_profile: has_complete_profile(&user, &profile),
    };
    tx.commit().await?;
    Ok(Json(stats))
}
