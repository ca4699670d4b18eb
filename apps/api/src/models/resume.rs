use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeRow {
    pub user_id: Uuid,
    pub resume_data: Value,
    pub last_generated: DateTime<Utc>,
    pub template_type: String,
}

impl ResumeRow {
    /// Number of skills recorded in the stored document.
    pub fn skill_count(&self) -> usize {
        self.resume_data
            .get("skills")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}
