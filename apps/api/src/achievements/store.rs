use sqlx::PgConnection;
use uuid::Uuid;

use crate::achievements::Achievement;

/// Returns all of a user's records of one kind, in store order.
pub async fn list<A: Achievement>(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Vec<A>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM {} WHERE user_id = $1 ORDER BY {}",
        A::TABLE,
        A::ORDER_BY
    );
    sqlx::query_as::<_, A>(&sql)
        .bind(user_id)
        .fetch_all(conn)
        .await
}

pub async fn get<A: Achievement>(
    conn: &mut PgConnection,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<A>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} WHERE id = $1 AND user_id = $2", A::TABLE);
    sqlx::query_as::<_, A>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

/// Deletes a record. Returns false when nothing owned by `user_id` matched.
pub async fn delete<A: Achievement>(
    conn: &mut PgConnection,
    user_id: Uuid,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", A::TABLE);
    let result = sqlx::query(&sql)
        .bind(id)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count<A: Achievement>(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = $1", A::TABLE);
    sqlx::query_scalar(&sql)
        .bind(user_id)
        .fetch_one(conn)
        .await
}
