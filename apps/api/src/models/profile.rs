#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileRow {
    #[serde(skip)]
    pub user_id: Uuid,
    pub phone: String,
    pub bio: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
