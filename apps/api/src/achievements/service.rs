use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::achievements::{store, Achievement};
use crate::errors::AppError;
use crate::resume::service::regenerate_resume;

fn not_found<A: Achievement>(id: Uuid) -> AppError {
    AppError::NotFound(format!("{} {id} not found", A::KIND.label()))
}

pub async fn create_achievement<A: Achievement>(
    pool: &PgPool,
    user_id: Uuid,
    input: A::Input,
) -> Result<A, AppError> {
    let new = A::validate(input)?;

    let mut tx = pool.begin().await?;
    let record = A::insert(&mut tx, user_id, &new).await?;
    regenerate_resume(&mut tx, user_id).await?;
    tx.commit().await?;

    info!(
        "Created {} {} for user {user_id}",
        A::KIND.as_str(),
        record.id()
    );
    Ok(record)
}

/// Replaces a record. With `partial`, fields missing from `input` keep their stored values.
pub async fn update_achievement<A: Achievement>(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: A::Input,
    partial: bool,
) -> Result<A, AppError> {
    let mut tx = pool.begin().await?;

    let input = if partial {
        let existing = store::get::<A>(&mut tx, user_id, id)
            .await?
            .ok_or_else(|| not_found::<A>(id))?;
        A::overlay(input, existing.to_input())
    } else {
        input
    };
    let new = A::validate(input)?;

    let record = A::update(&mut tx, user_id, id, &new)
        .await?
        .ok_or_else(|| not_found::<A>(id))?;
    regenerate_resume(&mut tx, user_id).await?;
    tx.commit().await?;

    info!("Updated {} {id} for user {user_id}", A::KIND.as_str());
    Ok(record)
}

pub async fn delete_achievement<A: Achievement>(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    if !store::delete::<A>(&mut tx, user_id, id).await? {
        return Err(not_found::<A>(id));
    }
    regenerate_resume(&mut tx, user_id).await?;
    tx.commit().await?;

    info!("Deleted {} {id} for user {user_id}", A::KIND.as_str());
    Ok(())
}
