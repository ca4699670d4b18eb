use chrono::NaiveDate;
use serde::Deserialize;

use crate::validation::{nullable, FieldErrors};

// ────────────────────────────────────────────────────────────────────────────
// Internship
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InternshipInput {
    pub company: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    pub description: Option<String>,
    pub skills_used: Option<String>,
    pub location: Option<String>,
    pub is_current: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInternship {
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub skills_used: String,
    pub location: String,
    pub is_current: bool,
}

impl InternshipInput {
    pub fn validate(self) -> Result<NewInternship, FieldErrors> {
        let mut e = FieldErrors::new();
        let new = NewInternship {
            company: e.required_text("company", self.company, 200),
            role: e.required_text("role", self.role, 200),
            start_date: e.required_date("start_date", self.start_date),
            end_date: e.optional_date("end_date", self.end_date.flatten()),
            description: e.required_body("description", self.description),
            skills_used: e.required_text("skills_used", self.skills_used, 500),
            location: e.optional_text("location", self.location, 100),
            is_current: self.is_current.unwrap_or(false),
        };
        e.into_result(|| new)
    }

    pub fn or(self, base: Self) -> Self {
        Self {
            company: self.company.or(base.company),
            role: self.role.or(base.role),
            start_date: self.start_date.or(base.start_date),
            end_date: self.end_date.or(base.end_date),
            description: self.description.or(base.description),
            skills_used: self.skills_used.or(base.skills_used),
            location: self.location.or(base.location),
            is_current: self.is_current.or(base.is_current),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Course
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourseInput {
    pub platform: Option<String>,
    pub title: Option<String>,
    pub completion_date: Option<String>,
    pub certificate_url: Option<String>,
    pub skills_learned: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub duration_hours: Option<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub platform: String,
    pub title: String,
    pub completion_date: NaiveDate,
    pub certificate_url: String,
    pub skills_learned: String,
    pub duration_hours: Option<i32>,
}

impl CourseInput {
    pub fn validate(self) -> Result<NewCourse, FieldErrors> {
        let mut e = FieldErrors::new();
        let duration_hours = self.duration_hours.flatten();
        if matches!(duration_hours, Some(h) if h < 0) {
            e.add(
                "duration_hours",
                "Ensure this value is greater than or equal to 0.",
            );
        }
        let new = NewCourse {
            platform: e.required_text("platform", self.platform, 100),
            title: e.required_text("title", self.title, 300),
            completion_date: e.required_date("completion_date", self.completion_date),
            certificate_url: e.optional_url("certificate_url", self.certificate_url, 200),
            skills_learned: e.required_text("skills_learned", self.skills_learned, 500),
            duration_hours,
        };
        e.into_result(|| new)
    }

    pub fn or(self, base: Self) -> Self {
        Self {
            platform: self.platform.or(base.platform),
            title: self.title.or(base.title),
            completion_date: self.completion_date.or(base.completion_date),
            certificate_url: self.certificate_url.or(base.certificate_url),
            skills_learned: self.skills_learned.or(base.skills_learned),
            duration_hours: self.duration_hours.or(base.duration_hours),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Hackathon
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HackathonInput {
    pub name: Option<String>,
    pub organizer: Option<String>,
    pub date: Option<String>,
    pub rank: Option<String>,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub project_link: Option<String>,
    pub tech_stack: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHackathon {
    pub name: String,
    pub organizer: String,
    pub date: NaiveDate,
    pub rank: String,
    pub project_name: String,
    pub project_description: String,
    pub project_link: String,
    pub tech_stack: String,
}

impl HackathonInput {
    pub fn validate(self) -> Result<NewHackathon, FieldErrors> {
        let mut e = FieldErrors::new();
        let new = NewHackathon {
            name: e.required_text("name", self.name, 200),
            organizer: e.required_text("organizer", self.organizer, 200),
            date: e.required_date("date", self.date),
            rank: e.optional_text("rank", self.rank, 50),
            project_name: e.required_text("project_name", self.project_name, 200),
            project_description: e.required_body("project_description", self.project_description),
            project_link: e.optional_url("project_link", self.project_link, 200),
            tech_stack: e.required_text("tech_stack", self.tech_stack, 500),
        };
        e.into_result(|| new)
    }

    pub fn or(self, base: Self) -> Self {
        Self {
            name: self.name.or(base.name),
            organizer: self.organizer.or(base.organizer),
            date: self.date.or(base.date),
            rank: self.rank.or(base.rank),
            project_name: self.project_name.or(base.project_name),
            project_description: self.project_description.or(base.project_description),
            project_link: self.project_link.or(base.project_link),
            tech_stack: self.tech_stack.or(base.tech_stack),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Project
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub start_date: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    pub is_ongoing: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub github_link: String,
    pub live_link: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_ongoing: bool,
}

impl ProjectInput {
    pub fn validate(self) -> Result<NewProject, FieldErrors> {
        let mut e = FieldErrors::new();
        let new = NewProject {
            title: e.required_text("title", self.title, 200),
            description: e.required_body("description", self.description),
            tech_stack: e.required_text("tech_stack", self.tech_stack, 500),
            github_link: e.optional_url("github_link", self.github_link, 200),
            live_link: e.optional_url("live_link", self.live_link, 200),
            start_date: e.required_date("start_date", self.start_date),
            end_date: e.optional_date("end_date", self.end_date.flatten()),
            is_ongoing: self.is_ongoing.unwrap_or(false),
        };
        e.into_result(|| new)
    }

    pub fn or(self, base: Self) -> Self {
        Self {
            title: self.title.or(base.title),
            description: self.description.or(base.description),
            tech_stack: self.tech_stack.or(base.tech_stack),
            github_link: self.github_link.or(base.github_link),
            live_link: self.live_link.or(base.live_link),
            start_date: self.start_date.or(base.start_date),
            end_date: self.end_date.or(base.end_date),
            is_ongoing: self.is_ongoing.or(base.is_ongoing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{BAD_DATE, BAD_URL, REQUIRED};
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(v: serde_json::Value) -> T {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_internship_valid() {
        let input: InternshipInput = parse(json!({
            "company": "Acme",
            "role": "Backend Intern",
            "start_date": "2024-06-01",
            "end_date": null,
            "description": "Shipped the billing service",
            "skills_used": "Rust, SQL"
        }));
        let new = input.validate().unwrap();
        assert_eq!(new.company, "Acme");
        assert_eq!(new.end_date, None);
        assert!(!new.is_current);
        assert_eq!(new.location, "");
    }

    #[test]
    fn test_internship_reports_every_missing_field() {
        let errors = InternshipInput::default().validate().unwrap_err();
        for field in ["company", "role", "start_date", "description", "skills_used"] {
            assert_eq!(errors.get(field), Some(&[REQUIRED.to_string()][..]), "{field}");
        }
        assert!(errors.get("location").is_none());
        assert!(errors.get("end_date").is_none());
    }

    #[test]
    fn test_course_checks_url_date_and_duration() {
        let input: CourseInput = parse(json!({
            "platform": "Coursera",
            "title": "Databases",
            "completion_date": "June 2024",
            "certificate_url": "not a url",
            "skills_learned": "SQL",
            "duration_hours": -3
        }));
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("completion_date"), Some(&[BAD_DATE.to_string()][..]));
        assert_eq!(errors.get("certificate_url"), Some(&[BAD_URL.to_string()][..]));
        assert!(errors.get("duration_hours").is_some());
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn test_hackathon_rank_length() {
        let input: HackathonInput = parse(json!({
            "name": "HackMIT",
            "organizer": "MIT",
            "date": "2023-09-16",
            "rank": "x".repeat(51),
            "project_name": "Lens",
            "project_description": "AR notes",
            "tech_stack": "Swift"
        }));
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.get("rank").unwrap()[0],
            "Ensure this field has no more than 50 characters."
        );
    }

    #[test]
    fn test_project_valid_with_links() {
        let input: ProjectInput = parse(json!({
            "title": "Resume builder",
            "description": "This API",
            "tech_stack": "Rust, Axum, Postgres",
            "github_link": "https://github.com/me/resume",
            "start_date": "2024-01-10",
            "is_ongoing": true
        }));
        let new = input.validate().unwrap();
        assert!(new.is_ongoing);
        assert_eq!(new.live_link, "");
    }

    #[test]
    fn test_overlay_prefers_patch_fields() {
        let base = ProjectInput {
            title: Some("Old".to_string()),
            description: Some("Desc".to_string()),
            tech_stack: Some("Go".to_string()),
            start_date: Some("2022-01-01".to_string()),
            ..Default::default()
        };
        let patch = ProjectInput {
            title: Some("New".to_string()),
            ..Default::default()
        };
        let merged = patch.or(base).validate().unwrap();
        assert_eq!(merged.title, "New");
        assert_eq!(merged.tech_stack, "Go");
    }
}
