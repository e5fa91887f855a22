use sqlx::PgPool;
use uuid::Uuid;

use super::dto::ListType;
use crate::catalog::repo::Movie;

/// True if the (user, movie, list) triple already exists.
pub async fn contains(
    db: &PgPool,
    user_id: Uuid,
    movie_id: Uuid,
    list_type: ListType,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        r#"
        SELECT 1 FROM user_lists
        WHERE user_id = $1 AND movie_id = $2 AND list_type = $3
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(list_type.as_str())
    .fetch_optional(db)
    .await?;
    Ok(row.is_some())
}

/// Insert a membership record. The unique constraint on the triple backs the
/// caller's existence check against concurrent duplicate adds.
pub async fn add(
    db: &PgPool,
    user_id: Uuid,
    movie_id: Uuid,
    list_type: ListType,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_lists (user_id, movie_id, list_type)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(list_type.as_str())
    .execute(db)
    .await?;
    Ok(())
}

/// Delete the matching record; the unique triple means at most one row.
/// Returns false when there was nothing to delete.
pub async fn remove(
    db: &PgPool,
    user_id: Uuid,
    movie_id: Uuid,
    list_type: ListType,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM user_lists
        WHERE user_id = $1 AND movie_id = $2 AND list_type = $3
        "#,
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(list_type.as_str())
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Movies in a user's list: membership rows first, then one batched catalog
/// lookup. The catalog defines the return order, not membership order.
pub async fn movies_in(
    db: &PgPool,
    user_id: Uuid,
    list_type: ListType,
) -> Result<Vec<Movie>, sqlx::Error> {
    let movie_ids: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT movie_id FROM user_lists
        WHERE user_id = $1 AND list_type = $2
        "#,
    )
    .bind(user_id)
    .bind(list_type.as_str())
    .fetch_all(db)
    .await?;

    Movie::find_by_ids(db, &movie_ids).await
}
