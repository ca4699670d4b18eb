use sqlx::PgConnection;
use uuid::Uuid;

use crate::auth::NewUser;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::validation::FieldErrors;

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Loads a user and holds a row lock until the surrounding transaction ends.
/// `NO KEY UPDATE` leaves the key-share locks taken by foreign-key inserts
/// alone, so concurrent writers of achievement rows queue here instead of
/// deadlocking.
pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1 FOR NO KEY UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_username(
    conn: &mut PgConnection,
    username: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_email(
    conn: &mut PgConnection,
    email: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(conn)
        .await
}

/// Inserts a user, reporting username/email collisions as field errors.
pub async fn insert(
    conn: &mut PgConnection,
    new: &NewUser,
    password_hash: &str,
) -> Result<UserRow, AppError> {
    let result = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, username, email, first_name, last_name, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.username)
    .bind(&new.email)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(password_hash)
    .fetch_one(conn)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            let errors = match db.constraint() {
                Some(c) if c.contains("email") => {
                    FieldErrors::single("email", "A user with that email already exists.")
                }
                _ => FieldErrors::single("username", "A user with that username already exists."),
            };
            Err(AppError::Validation(errors))
        }
        Err(e) => Err(AppError::Database(e)),
    }
}
