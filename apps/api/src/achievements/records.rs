//! [`Achievement`] implementations for the four stored record types.

use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::achievements::inputs::{
    CourseInput, HackathonInput, InternshipInput, NewCourse, NewHackathon, NewInternship,
    NewProject, ProjectInput,
};
use crate::achievements::{Achievement, AchievementKind};
use crate::models::achievement::{CourseRow, HackathonRow, InternshipRow, ProjectRow};
use crate::validation::FieldErrors;

#[async_trait]
impl Achievement for InternshipRow {
    type Input = InternshipInput;
    type New = NewInternship;

    const KIND: AchievementKind = AchievementKind::Internship;
    const TABLE: &'static str = "internships";
    const ORDER_BY: &'static str = "start_date DESC, created_at DESC, id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn skill_field(&self) -> &str {
        &self.skills_used
    }

    fn validate(input: InternshipInput) -> Result<NewInternship, FieldErrors> {
        input.validate()
    }

    fn to_input(&self) -> InternshipInput {
        InternshipInput {
            company: Some(self.company.clone()),
            role: Some(self.role.clone()),
            start_date: Some(self.start_date.to_string()),
            end_date: Some(self.end_date.map(|d| d.to_string())),
            description: Some(self.description.clone()),
            skills_used: Some(self.skills_used.clone()),
            location: Some(self.location.clone()),
            is_current: Some(self.is_current),
        }
    }

    fn overlay(patch: InternshipInput, base: InternshipInput) -> InternshipInput {
        patch.or(base)
    }

    async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        new: &NewInternship,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, InternshipRow>(
            r#"
            INSERT INTO internships
                (id, user_id, company, role, start_date, end_date,
                 description, skills_used, location, is_current)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.company)
        .bind(&new.role)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(&new.description)
        .bind(&new.skills_used)
        .bind(&new.location)
        .bind(new.is_current)
        .fetch_one(conn)
        .await
    }

    async fn update(
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
        new: &NewInternship,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, InternshipRow>(
            r#"
            UPDATE internships
            SET company = $3, role = $4, start_date = $5, end_date = $6,
                description = $7, skills_used = $8, location = $9, is_current = $10
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&new.company)
        .bind(&new.role)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(&new.description)
        .bind(&new.skills_used)
        .bind(&new.location)
        .bind(new.is_current)
        .fetch_optional(conn)
        .await
    }
}

#[async_trait]
impl Achievement for CourseRow {
    type Input = CourseInput;
    type New = NewCourse;

    const KIND: AchievementKind = AchievementKind::Course;
    const TABLE: &'static str = "courses";
    const ORDER_BY: &'static str = "completion_date DESC, created_at DESC, id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn skill_field(&self) -> &str {
        &self.skills_learned
    }

    fn validate(input: CourseInput) -> Result<NewCourse, FieldErrors> {
        input.validate()
    }

    fn to_input(&self) -> CourseInput {
        CourseInput {
            platform: Some(self.platform.clone()),
            title: Some(self.title.clone()),
            completion_date: Some(self.completion_date.to_string()),
            certificate_url: Some(self.certificate_url.clone()),
            skills_learned: Some(self.skills_learned.clone()),
            duration_hours: Some(self.duration_hours),
        }
    }

    fn overlay(patch: CourseInput, base: CourseInput) -> CourseInput {
        patch.or(base)
    }

    async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        new: &NewCourse,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, CourseRow>(
            r#"
            INSERT INTO courses
                (id, user_id, platform, title, completion_date,
                 certificate_url, skills_learned, duration_hours)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.platform)
        .bind(&new.title)
        .bind(new.completion_date)
        .bind(&new.certificate_url)
        .bind(&new.skills_learned)
        .bind(new.duration_hours)
        .fetch_one(conn)
        .await
    }

    async fn update(
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
        new: &NewCourse,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, CourseRow>(
            r#"
            UPDATE courses
            SET platform = $3, title = $4, completion_date = $5,
                certificate_url = $6, skills_learned = $7, duration_hours = $8
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&new.platform)
        .bind(&new.title)
        .bind(new.completion_date)
        .bind(&new.certificate_url)
        .bind(&new.skills_learned)
        .bind(new.duration_hours)
        .fetch_optional(conn)
        .await
    }
}

#[async_trait]
impl Achievement for HackathonRow {
    type Input = HackathonInput;
    type New = NewHackathon;

    const KIND: AchievementKind = AchievementKind::Hackathon;
    const TABLE: &'static str = "hackathons";
    const ORDER_BY: &'static str = "date DESC, created_at DESC, id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn skill_field(&self) -> &str {
        &self.tech_stack
    }

    fn validate(input: HackathonInput) -> Result<NewHackathon, FieldErrors> {
        input.validate()
    }

    fn to_input(&self) -> HackathonInput {
        HackathonInput {
            name: Some(self.name.clone()),
            organizer: Some(self.organizer.clone()),
            date: Some(self.date.to_string()),
            rank: Some(self.rank.clone()),
            project_name: Some(self.project_name.clone()),
            project_description: Some(self.project_description.clone()),
            project_link: Some(self.project_link.clone()),
            tech_stack: Some(self.tech_stack.clone()),
        }
    }

    fn overlay(patch: HackathonInput, base: HackathonInput) -> HackathonInput {
        patch.or(base)
    }

    async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        new: &NewHackathon,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, HackathonRow>(
            r#"
            INSERT INTO hackathons
                (id, user_id, name, organizer, date, rank, project_name,
                 project_description, project_link, tech_stack)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.name)
        .bind(&new.organizer)
        .bind(new.date)
        .bind(&new.rank)
        .bind(&new.project_name)
        .bind(&new.project_description)
        .bind(&new.project_link)
        .bind(&new.tech_stack)
        .fetch_one(conn)
        .await
    }

    async fn update(
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
        new: &NewHackathon,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, HackathonRow>(
            r#"
            UPDATE hackathons
            SET name = $3, organizer = $4, date = $5, rank = $6, project_name = $7,
                project_description = $8, project_link = $9, tech_stack = $10
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&new.name)
        .bind(&new.organizer)
        .bind(new.date)
        .bind(&new.rank)
        .bind(&new.project_name)
        .bind(&new.project_description)
        .bind(&new.project_link)
        .bind(&new.tech_stack)
        .fetch_optional(conn)
        .await
    }
}

#[async_trait]
impl Achievement for ProjectRow {
    type Input = ProjectInput;
    type New = NewProject;

    const KIND: AchievementKind = AchievementKind::Project;
    const TABLE: &'static str = "projects";
    const ORDER_BY: &'static str = "start_date DESC, created_at DESC, id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn skill_field(&self) -> &str {
        &self.tech_stack
    }

    fn validate(input: ProjectInput) -> Result<NewProject, FieldErrors> {
        input.validate()
    }

    fn to_input(&self) -> ProjectInput {
        ProjectInput {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            tech_stack: Some(self.tech_stack.clone()),
            github_link: Some(self.github_link.clone()),
            live_link: Some(self.live_link.clone()),
            start_date: Some(self.start_date.to_string()),
            end_date: Some(self.end_date.map(|d| d.to_string())),
            is_ongoing: Some(self.is_ongoing),
        }
    }

    fn overlay(patch: ProjectInput, base: ProjectInput) -> ProjectInput {
        patch.or(base)
    }

    async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        new: &NewProject,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects
                (id, user_id, title, description, tech_stack, github_link,
                 live_link, start_date, end_date, is_ongoing)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.tech_stack)
        .bind(&new.github_link)
        .bind(&new.live_link)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.is_ongoing)
        .fetch_one(conn)
        .await
    }

    async fn update(
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
        new: &NewProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET title = $3, description = $4, tech_stack = $5, github_link = $6,
                live_link = $7, start_date = $8, end_date = $9, is_ongoing = $10
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.tech_stack)
        .bind(&new.github_link)
        .bind(&new.live_link)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.is_ongoing)
        .fetch_optional(conn)
        .await
    }
}
