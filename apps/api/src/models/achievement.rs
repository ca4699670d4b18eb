use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InternshipRow {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub skills_used: String,
    pub location: String,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub platform: String,
    pub title: String,
    pub completion_date: NaiveDate,
    pub certificate_url: String,
    pub skills_learned: String,
    pub duration_hours: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HackathonRow {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub name: String,
    pub organizer: String,
    pub date: NaiveDate,
    pub rank: String,
    pub project_name: String,
    pub project_description: String,
    pub project_link: String,
    pub tech_stack: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub github_link: String,
    pub live_link: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_ongoing: bool,
    pub created_at: DateTime<Utc>,
}
