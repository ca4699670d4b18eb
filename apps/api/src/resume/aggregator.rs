//! Pure resume aggregation.
//!
//! Turns a user's identity, profile and achievement collections into the
//! denormalized [`ResumeDocument`]. Nothing in here touches the database; the
//! same inputs always produce the same document.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::models::achievement::{CourseRow, HackathonRow, InternshipRow, ProjectRow};
use crate::models::profile::ProfileRow;
use crate::models::user::UserRow;

/// Number of skills quoted in the generated summary.
const SUMMARY_SKILL_LIMIT: usize = 5;

const ASPIRING_SUMMARY: &str = "Aspiring professional looking to build a career in technology.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub internships: Vec<InternshipSection>,
    pub courses: Vec<CourseSection>,
    pub hackathons: Vec<HackathonSection>,
    pub projects: Vec<ProjectSection>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternshipSection {
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub skills: String,
    pub location: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSection {
    pub platform: String,
    pub title: String,
    pub completion_date: String,
    pub certificate_url: String,
    pub skills: String,
    pub duration_hours: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HackathonSection {
    pub name: String,
    pub organizer: String,
    pub date: String,
    pub rank: String,
    pub project_name: String,
    pub project_description: String,
    pub project_link: String,
    pub tech_stack: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSection {
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub github_link: String,
    pub live_link: String,
    pub start_date: String,
    pub end_date: String,
    pub is_ongoing: bool,
}

/// Everything the aggregator reads. Collections are expected in store order.
pub struct ResumeInputs<'a> {
    pub user: &'a UserRow,
    pub profile: &'a ProfileRow,
    pub internships: &'a [InternshipRow],
    pub courses: &'a [CourseRow],
    pub hackathons: &'a [HackathonRow],
    pub projects: &'a [ProjectRow],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementCounts {
    pub internships: usize,
    pub courses: usize,
    pub hackathons: usize,
    pub projects: usize,
}

impl AchievementCounts {
    pub fn is_empty(&self) -> bool {
        self.internships == 0 && self.courses == 0 && self.hackathons == 0 && self.projects == 0
    }
}

pub fn build_resume_document(inputs: &ResumeInputs<'_>) -> ResumeDocument {
    let skills = extract_skills(inputs);
    let counts = AchievementCounts {
        internships: inputs.internships.len(),
        courses: inputs.courses.len(),
        hackathons: inputs.hackathons.len(),
        projects: inputs.projects.len(),
    };
    let summary = generate_summary(counts, &skills);

    ResumeDocument {
        personal_info: build_personal_info(inputs.user, inputs.profile),
        skills,
        internships: inputs.internships.iter().map(internship_section).collect(),
        courses: inputs.courses.iter().map(course_section).collect(),
        hackathons: inputs.hackathons.iter().map(hackathon_section).collect(),
        projects: inputs.projects.iter().map(project_section).collect(),
        summary,
    }
}

/// Splits a comma-separated skill field into trimmed, non-empty tokens.
pub fn parse_skills(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Union of every achievement's skills, deduplicated and sorted.
pub fn extract_skills(inputs: &ResumeInputs<'_>) -> Vec<String> {
    let mut all: BTreeSet<&str> = BTreeSet::new();
    all.extend(inputs.internships.iter().flat_map(|a| parse_skills(a.skill_field())));
    all.extend(inputs.courses.iter().flat_map(|a| parse_skills(a.skill_field())));
    all.extend(inputs.hackathons.iter().flat_map(|a| parse_skills(a.skill_field())));
    all.extend(inputs.projects.iter().flat_map(|a| parse_skills(a.skill_field())));
    all.into_iter().map(str::to_string).collect()
}

pub fn build_personal_info(user: &UserRow, profile: &ProfileRow) -> PersonalInfo {
    let full_name = format!("{} {}", user.first_name, user.last_name)
        .trim()
        .to_string();
    let bio = if profile.bio.is_empty() {
        "No bio available".to_string()
    } else {
        profile.bio.clone()
    };

    PersonalInfo {
        name: if full_name.is_empty() {
            user.username.clone()
        } else {
            full_name
        },
        email: user.email.clone(),
        phone: profile.phone.clone(),
        linkedin: profile.linkedin.clone(),
        github: profile.github.clone(),
        location: profile.location.clone(),
        bio,
    }
}

/// Builds the summary sentence from achievement counts and the sorted skills.
/// Clauses for zero-count categories are left out.
pub fn generate_summary(counts: AchievementCounts, skills: &[String]) -> String {
    if counts.is_empty() {
        return ASPIRING_SUMMARY.to_string();
    }

    let mut parts = Vec::new();
    if counts.internships > 0 {
        parts.push(format!(
            "Experienced professional with {} internship(s)",
            counts.internships
        ));
    }
    if !skills.is_empty() {
        let top = skills
            .iter()
            .take(SUMMARY_SKILL_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("skilled in {top}"));
    }
    if counts.projects > 0 {
        parts.push(format!("with {} project(s) completed", counts.projects));
    }
    if counts.hackathons > 0 {
        parts.push(format!(
            "and {} hackathon participation(s)",
            counts.hackathons
        ));
    }

    // Courses alone contribute only through their skills, so a courses-only
    // user without skills gets a bare ".".
    capitalize(&(parts.join(". ") + "."))
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

fn internship_section(i: &InternshipRow) -> InternshipSection {
    InternshipSection {
        company: i.company.clone(),
        role: i.role.clone(),
        start_date: i.start_date.to_string(),
        end_date: i
            .end_date
            .map_or_else(|| "Present".to_string(), |d| d.to_string()),
        description: i.description.clone(),
        skills: i.skills_used.clone(),
        location: i.location.clone(),
        is_current: i.is_current,
    }
}

fn course_section(c: &CourseRow) -> CourseSection {
    CourseSection {
        platform: c.platform.clone(),
        title: c.title.clone(),
        completion_date: c.completion_date.to_string(),
        certificate_url: c.certificate_url.clone(),
        skills: c.skills_learned.clone(),
        duration_hours: c.duration_hours,
    }
}

fn hackathon_section(h: &HackathonRow) -> HackathonSection {
    HackathonSection {
        name: h.name.clone(),
        organizer: h.organizer.clone(),
        date: h.date.to_string(),
        rank: if h.rank.is_empty() {
            "Participant".to_string()
        } else {
            h.rank.clone()
        },
        project_name: h.project_name.clone(),
        project_description: h.project_description.clone(),
        project_link: h.project_link.clone(),
        tech_stack: h.tech_stack.clone(),
    }
}

fn project_section(p: &ProjectRow) -> ProjectSection {
    ProjectSection {
        title: p.title.clone(),
        description: p.description.clone(),
        tech_stack: p.tech_stack.clone(),
        github_link: p.github_link.clone(),
        live_link: p.live_link.clone(),
        start_date: p.start_date.to_string(),
        end_date: p
            .end_date
            .map_or_else(|| "Ongoing".to_string(), |d| d.to_string()),
        is_ongoing: p.is_ongoing,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn skills(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skills_union_example() {
        let (user, profile) = (user(), profile());
        let internships = [internship("Acme", "Python, React")];
        let projects = [project("Site", "React, SQL")];
        let inputs = ResumeInputs {
            user: &user,
            profile: &profile,
            internships: &internships,
            courses: &[],
            hackathons: &[],
            projects: &projects,
        };
        assert_eq!(extract_skills(&inputs), skills(&["Python", "React", "SQL"]));
    }

    #[test]
    fn test_skills_deduplicated_sorted_and_trimmed() {
        let (user, profile) = (user(), profile());
        let internships = [internship("Acme", " Rust ,, Go,Rust , ")];
        let courses = [course("Algorithms", "C++, Go")];
        let hackathons = [hackathon("HackMIT", "Axum,Rust")];
        let inputs = ResumeInputs {
            user: &user,
            profile: &profile,
            internships: &internships,
            courses: &courses,
            hackathons: &hackathons,
            projects: &[],
        };
        let got = extract_skills(&inputs);
        assert_eq!(got, skills(&["Axum", "C++", "Go", "Rust"]));
        let mut sorted = got.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(got, sorted);
    }

    #[test]
    fn test_skills_are_case_sensitive() {
        let (user, profile) = (user(), profile());
        let projects = [project("A", "react, React")];
        let inputs = ResumeInputs {
            user: &user,
            profile: &profile,
            internships: &[],
            courses: &[],
            hackathons: &[],
            projects: &projects,
        };
        assert_eq!(extract_skills(&inputs), skills(&["React", "react"]));
    }

    #[test]
    fn test_summary_no_achievements() {
        let summary = generate_summary(AchievementCounts::default(), &[]);
        assert_eq!(summary, ASPIRING_SUMMARY);
    }

    #[test]
    fn test_summary_all_clauses() {
        let counts = AchievementCounts {
            internships: 2,
            courses: 1,
            hackathons: 3,
            projects: 1,
        };
        let summary = generate_summary(counts, &skills(&["Go", "Python", "React"]));
        assert_eq!(
            summary,
            "Experienced professional with 2 internship(s). skilled in go, python, react. \
             with 1 project(s) completed. and 3 hackathon participation(s)."
        );
    }

    #[test]
    fn test_summary_omits_zero_count_clauses() {
        let counts = AchievementCounts {
            projects: 1,
            ..Default::default()
        };
        let summary = generate_summary(counts, &skills(&["SQL"]));
        assert_eq!(summary, "Skilled in sql. with 1 project(s) completed.");
        assert!(!summary.contains("internship"));
        assert!(!summary.contains("hackathon"));
    }

    #[test]
    fn test_summary_quotes_at_most_five_skills() {
        let counts = AchievementCounts {
            internships: 1,
            ..Default::default()
        };
        let all = skills(&["A", "B", "C", "D", "E", "F", "G"]);
        let summary = generate_summary(counts, &all);
        assert!(summary.contains("skilled in a, b, c, d, e."));
        assert!(!summary.contains(", f"));
    }

    #[test]
    fn test_summary_courses_without_skills_is_bare_period() {
        let counts = AchievementCounts {
            courses: 2,
            ..Default::default()
        };
        assert_eq!(generate_summary(counts, &[]), ".");
    }

    #[test]
    fn test_summary_lowercases_after_first_character() {
        let counts = AchievementCounts {
            internships: 1,
            ..Default::default()
        };
        assert_eq!(
            generate_summary(counts, &skills(&["Python", "React"])),
            "Experienced professional with 1 internship(s). skilled in python, react."
        );

        let counts = AchievementCounts {
            courses: 1,
            ..Default::default()
        };
        assert_eq!(
            generate_summary(counts, &skills(&["PostgreSQL"])),
            "Skilled in postgresql."
        );
    }

    #[test]
    fn test_personal_info_fallbacks() {
        let mut user = user();
        user.first_name.clear();
        user.last_name.clear();
        let info = build_personal_info(&user, &profile());
        assert_eq!(info.name, "ada");
        assert_eq!(info.bio, "No bio available");
        assert_eq!(info.phone, "");

        user.first_name = "Ada".to_string();
        let mut p = profile();
        p.bio = "Analyst".to_string();
        let info = build_personal_info(&user, &p);
        assert_eq!(info.name, "Ada");
        assert_eq!(info.bio, "Analyst");
    }

    #[test]
    fn test_sections_preserve_order_and_placeholders() {
        let (user, profile) = (user(), profile());
        let mut finished = project("Finished", "Go");
        finished.end_date = Some(date(2023, 1, 31));
        finished.is_ongoing = false;
        let projects = [project("Ongoing", "Rust"), finished];
        let hackathons = [hackathon("HackMIT", "Rust")];
        let internships = [internship("Acme", "Python")];
        let inputs = ResumeInputs {
            user: &user,
            profile: &profile,
            internships: &internships,
            courses: &[],
            hackathons: &hackathons,
            projects: &projects,
        };
        let doc = build_resume_document(&inputs);

        assert_eq!(doc.projects[0].title, "Ongoing");
        assert_eq!(doc.projects[0].end_date, "Ongoing");
        assert_eq!(doc.projects[1].end_date, "2023-01-31");
        assert_eq!(doc.projects[1].start_date, "2022-09-01");
        assert_eq!(doc.hackathons[0].rank, "Participant");
        assert_eq!(doc.internships[0].end_date, "Present");
        assert_eq!(doc.internships[0].skills, "Python");
        assert!(doc.courses.is_empty());
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let (user, profile) = (user(), profile());
        let internships = [internship("Acme", "Python, React")];
        let courses = [course("ML", "Python, NumPy")];
        let inputs = ResumeInputs {
            user: &user,
            profile: &profile,
            internships: &internships,
            courses: &courses,
            hackathons: &[],
            projects: &[],
        };
        let first = build_resume_document(&inputs);
        let second = build_resume_document(&inputs);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_document_json_shape() {
        let (user, profile) = (user(), profile());
        let courses = [course("ML", "Python")];
        let inputs = ResumeInputs {
            user: &user,
            profile: &profile,
            internships: &[],
            courses: &courses,
            hackathons: &[],
            projects: &[],
        };
        let json = serde_json::to_value(build_resume_document(&inputs)).unwrap();
        assert_eq!(json["personal_info"]["name"], "Ada Lovelace");
        assert_eq!(json["skills"], serde_json::json!(["Python"]));
        assert_eq!(json["courses"][0]["duration_hours"], 40);
        assert_eq!(json["courses"][0]["completion_date"], "2023-02-01");
        assert_eq!(json["summary"], "Skilled in python.");
    }
}
