use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::profile::ProfileRow;
use crate::profile::NewProfile;

/// Returns the user's profile, creating an empty one if it does not exist yet.
pub async fn get_or_create(conn: &mut PgConnection, user_id: Uuid) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query("INSERT INTO profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
}

pub async fn update(
    conn: &mut PgConnection,
    user_id: Uuid,
    new: &NewProfile,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (user_id, phone, bio, linkedin, github, location)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO UPDATE
        SET phone = EXCLUDED.phone,
            bio = EXCLUDED.bio,
            linkedin = EXCLUDED.linkedin,
            github = EXCLUDED.github,
            location = EXCLUDED.location,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&new.phone)
    .bind(&new.bio)
    .bind(&new.linkedin)
    .bind(&new.github)
    .bind(&new.location)
    .fetch_one(conn)
    .await
}
