// Career achievements: internships, courses, hackathons and projects.
// Every mutation regenerates the owner's resume inside the same transaction.

pub mod handlers;
pub mod inputs;
pub mod records;
pub mod service;
pub mod store;

use std::str::FromStr;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, PgConnection};
use uuid::Uuid;

use crate::validation::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Internship,
    Course,
    Hackathon,
    Project,
}

impl AchievementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKind::Internship => "internship",
            AchievementKind::Course => "course",
            AchievementKind::Hackathon => "hackathon",
            AchievementKind::Project => "project",
        }
    }

    /// Human-readable label used in API messages.
    pub fn label(&self) -> &'static str {
        match self {
            AchievementKind::Internship => "Internship",
            AchievementKind::Course => "Course",
            AchievementKind::Hackathon => "Hackathon",
            AchievementKind::Project => "Project",
        }
    }
}

impl FromStr for AchievementKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internship" => Ok(AchievementKind::Internship),
            "course" => Ok(AchievementKind::Course),
            "hackathon" => Ok(AchievementKind::Hackathon),
            "project" => Ok(AchievementKind::Project),
            _ => Err(()),
        }
    }
}

/// A stored achievement record.
///
/// Implementors name their table and store order, know which column holds
/// their comma-separated skills, and provide the typed insert/update
/// statements. Listing, lookup, counting and deletion are generic over this
/// trait (see [`store`]).
#[async_trait]
pub trait Achievement:
    for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Permissive request body; every field optional so validation can report all gaps.
    type Input: DeserializeOwned + Default + Send + 'static;
    /// Validated values ready to be written.
    type New: Send + Sync;

    const KIND: AchievementKind;
    const TABLE: &'static str;
    /// ORDER BY clause giving store order.
    const ORDER_BY: &'static str;

    fn id(&self) -> Uuid;

    /// Raw comma-separated skill or tech-stack field.
    fn skill_field(&self) -> &str;

    fn validate(input: Self::Input) -> Result<Self::New, FieldErrors>;

    /// The stored record expressed as a full input, used as the base for partial updates.
    fn to_input(&self) -> Self::Input;

    /// Fields present in `patch` win over `base`.
    fn overlay(patch: Self::Input, base: Self::Input) -> Self::Input;

    async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        new: &Self::New,
    ) -> Result<Self, sqlx::Error>;

    async fn update(
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
        new: &Self::New,
    ) -> Result<Option<Self>, sqlx::Error>;
}
