use sqlx::{types::Json, PgConnection};
use tracing::info;
use uuid::Uuid;

use crate::achievements::store;
use crate::auth::store as users;
use crate::errors::AppError;
use crate::models::achievement::{CourseRow, HackathonRow, InternshipRow, ProjectRow};
use crate::models::resume::ResumeRow;
use crate::profile::store as profiles;
use crate::resume::aggregator::{build_resume_document, ResumeInputs};

/// Rebuilds the user's resume document from scratch and stores it.
///
/// Call this on the same transaction as the mutation that made the stored
/// document stale. The user row stays locked until that transaction ends, so
/// regenerations for one user run one after another and each reads the rows
/// committed by the previous one.
pub async fn regenerate_resume(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let user = users::lock_by_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    let profile = profiles::get_or_create(conn, user_id).await?;

    let internships: Vec<InternshipRow> = store::list(conn, user_id).await?;
    let courses: Vec<CourseRow> = store::list(conn, user_id).await?;
    let hackathons: Vec<HackathonRow> = store::list(conn, user_id).await?;
    let projects: Vec<ProjectRow> = store::list(conn, user_id).await?;

    let document = build_resume_document(&ResumeInputs {
        user: &user,
        profile: &profile,
        internships: &internships,
        courses: &courses,
        hackathons: &hackathons,
        projects: &projects,
    });

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (user_id, resume_data, last_generated)
        VALUES ($1, $2, now())
        ON CONFLICT (user_id) DO UPDATE
        SET resume_data = EXCLUDED.resume_data,
            last_generated = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(Json(&document))
    .fetch_one(conn)
    .await?;

    info!(
        "Regenerated resume for user {user_id} ({} skills)",
        document.skills.len()
    );
    Ok(row)
}

/// Returns the stored resume, generating it first if the user has none.
pub async fn get_or_create_resume(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let existing = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    match existing {
        Some(row) => Ok(row),
        None => regenerate_resume(conn, user_id).await,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use sqlx::PgPool;

    use super::*;

    pub async fn stored_resume(pool: &PgPool, user_id: Uuid) -> ResumeRow {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    pub async fn stored_skills(pool: &PgPool, user_id: Uuid) -> Vec<String> {
        serde_json::from_value(stored_resume(pool, user_id).await.resume_data["skills"].clone())
            .unwrap()
    }
}
