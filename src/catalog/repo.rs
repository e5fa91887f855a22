use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::MovieCreate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub title_ru: String,
    pub description: String,
    pub description_ru: String,
    pub year: i32,
    pub duration: i32, // minutes
    pub genre_ids: Vec<String>,
    pub poster_url: String,
    pub trailer_url: String,
    pub video_url: Option<String>,
    pub rating: f64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: String, // slug, e.g. "action"
    pub name: String,
    pub name_ru: String,
}

const MOVIE_COLUMNS: &str = "id, title, title_ru, description, description_ru, year, duration, \
     genre_ids, poster_url, trailer_url, video_url, rating, created_at";

impl Movie {
    /// Case-insensitive substring search over titles and descriptions,
    /// optionally filtered to a genre, paginated.
    pub async fn search(
        db: &PgPool,
        search: Option<&str>,
        genre_id: Option<&str>,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE ($1::text IS NULL
                   OR title ILIKE '%' || $1 || '%'
                   OR title_ru ILIKE '%' || $1 || '%'
                   OR description ILIKE '%' || $1 || '%'
                   OR description_ru ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR $2 = ANY(genre_ids))
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        );
        sqlx::query_as::<_, Movie>(&sql)
            .bind(search)
            .bind(genre_id)
            .bind(limit)
            .bind(skip)
            .fetch_all(db)
            .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Movie>, sqlx::Error> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// One batched lookup for a set of IDs; the catalog's ordering applies.
    pub async fn find_by_ids(db: &PgPool, ids: &[Uuid]) -> Result<Vec<Movie>, sqlx::Error> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ANY($1) ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Movie>(&sql)
            .bind(ids)
            .fetch_all(db)
            .await
    }

    pub async fn create(db: &PgPool, movie: &MovieCreate) -> Result<Movie, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO movies (title, title_ru, description, description_ru, year, duration,
                                genre_ids, poster_url, trailer_url, video_url, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {MOVIE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Movie>(&sql)
            .bind(&movie.title)
            .bind(&movie.title_ru)
            .bind(&movie.description)
            .bind(&movie.description_ru)
            .bind(movie.year)
            .bind(movie.duration)
            .bind(&movie.genre_ids)
            .bind(&movie.poster_url)
            .bind(&movie.trailer_url)
            .bind(&movie.video_url)
            .bind(movie.rating)
            .fetch_one(db)
            .await
    }

    pub async fn title_exists(db: &PgPool, title: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM movies WHERE title = $1")
            .bind(title)
            .fetch_optional(db)
            .await?;
        Ok(row.is_some())
    }
}

impl Genre {
    pub async fn all(db: &PgPool) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name, name_ru FROM genres ORDER BY id")
            .fetch_all(db)
            .await
    }

    /// Insert a genre, keeping the existing row on a repeated ID.
    pub async fn insert_if_absent(db: &PgPool, genre: &Genre) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO genres (id, name, name_ru)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&genre.id)
        .bind(&genre.name)
        .bind(&genre.name_ru)
        .execute(db)
        .await?;
        Ok(())
    }
}
