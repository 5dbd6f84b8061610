//! Movie repository
//!
//! Handles movie CRUD and the searches over titles, years and the names of
//! the people attached to a movie:
//! - get: one query for the movie + director (LEFT JOIN), one for the cast
//! - update/delete: single `... RETURNING` statement, `None` when absent
//! - suffix searches: JOIN / EXISTS, newest first

use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool, Row};

use super::{DbError, Star};
use crate::models::{MovieDraft, Pagination, YearRange};

/// Movie record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i16,
    pub duration: Option<i16>,
    pub director_id: Option<i32>,
}

/// Movie with its director and cast resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDetail {
    pub id: i32,
    pub title: String,
    pub year: i16,
    pub duration: Option<i16>,
    pub director: Option<Star>,
    pub actors: Vec<Star>,
}

/// Movie repository
pub struct MovieRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MovieRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a movie with its director and actors.
    pub async fn get(&self, id: i32) -> Result<Option<MovieDetail>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let detail = fetch_detail(&mut *conn, id).await?;

        if let Some(movie) = &detail {
            tracing::debug!(
                movie_id = movie.id,
                title = %movie.title,
                director = movie.director.as_ref().map_or("no director", |d| d.name.as_str()),
                "Movie retrieved"
            );
        }
        Ok(detail)
    }

    /// List movies in id order.
    pub async fn list(&self, page: Pagination) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, year, duration, id_director AS director_id
            FROM movies
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    pub async fn list_all(&self) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, year, duration, id_director AS director_id FROM movies ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    /// Movies whose title is exactly `title`.
    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, year, duration, id_director AS director_id
            FROM movies
            WHERE title = $1
            ORDER BY id
            "#,
        )
        .bind(title)
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    /// Movies whose title contains `part` (case-sensitive, taken literally).
    pub async fn find_by_title_part(&self, part: &str) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, year, duration, id_director AS director_id
            FROM movies
            WHERE strpos(title, $1) > 0
            ORDER BY id
            "#,
        )
        .bind(part)
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    /// Movies matching both an exact title and a year.
    pub async fn find_by_title_year(&self, title: &str, year: i16) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, year, duration, id_director AS director_id
            FROM movies
            WHERE title = $1 AND year = $2
            ORDER BY year, title, id
            "#,
        )
        .bind(title)
        .bind(year)
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    /// Movies released within `range` (inclusive). An unbounded range returns
    /// every movie.
    pub async fn find_by_year_range(&self, range: YearRange) -> Result<Vec<Movie>, DbError> {
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, year, duration, id_director AS director_id
            FROM movies
            WHERE ($1::int2 IS NULL OR year >= $1)
              AND ($2::int2 IS NULL OR year <= $2)
            ORDER BY year, id
            "#,
        )
        .bind(range.year_min)
        .bind(range.year_max)
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    /// Movies whose director's name ends with `suffix`, newest first.
    pub async fn find_by_director_suffix(&self, suffix: &str) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.title, m.year, m.duration, m.id_director AS director_id
            FROM movies m
            JOIN stars d ON d.id = m.id_director
            WHERE right(d.name, char_length($1)) = $1
            ORDER BY m.year DESC, m.id
            "#,
        )
        .bind(suffix)
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    /// Movies with at least one actor whose name ends with `suffix`, newest
    /// first. Each movie appears once however many actors match.
    pub async fn find_by_actor_suffix(&self, suffix: &str) -> Result<Vec<Movie>, DbError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.title, m.year, m.duration, m.id_director AS director_id
            FROM movies m
            WHERE EXISTS (
                SELECT 1
                FROM play p
                JOIN stars s ON s.id = p.id_actor
                WHERE p.id_movie = m.id
                  AND right(s.name, char_length($1)) = $1
            )
            ORDER BY m.year DESC, m.id
            "#,
        )
        .bind(suffix)
        .fetch_all(self.pool)
        .await?;

        Ok(movies)
    }

    /// Insert a movie; the id is generated by the database.
    pub async fn create(&self, draft: &MovieDraft) -> Result<Movie, DbError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title, year, duration)
            VALUES ($1, $2, $3)
            RETURNING id, title, year, duration, id_director AS director_id
            "#,
        )
        .bind(draft.title())
        .bind(draft.year())
        .bind(draft.duration())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(movie_id = movie.id, title = %movie.title, "Movie created");
        Ok(movie)
    }

    /// Overwrite title, year and duration. Director and cast are untouched.
    /// Returns `None` when `id` is unknown.
    pub async fn update(&self, id: i32, draft: &MovieDraft) -> Result<Option<Movie>, DbError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET title = $2, year = $3, duration = $4
            WHERE id = $1
            RETURNING id, title, year, duration, id_director AS director_id
            "#,
        )
        .bind(id)
        .bind(draft.title())
        .bind(draft.year())
        .bind(draft.duration())
        .fetch_optional(self.pool)
        .await?;

        Ok(movie)
    }

    /// Delete a movie, returning the removed row. Cast entries go with it.
    pub async fn delete(&self, id: i32) -> Result<Option<Movie>, DbError> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            DELETE FROM movies
            WHERE id = $1
            RETURNING id, title, year, duration, id_director AS director_id
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        if let Some(movie) = &movie {
            tracing::debug!(movie_id = movie.id, "Movie deleted");
        }
        Ok(movie)
    }
}

/// Load a movie with director and cast on an existing connection, so callers
/// inside a transaction see their own writes.
pub(crate) async fn fetch_detail(
    conn: &mut PgConnection,
    id: i32,
) -> Result<Option<MovieDetail>, DbError> {
    let row = sqlx::query(
        r#"
        SELECT
            m.id,
            m.title,
            m.year,
            m.duration,
            d.id AS director_id,
            d.name AS director_name,
            d.birthdate AS director_birthdate
        FROM movies m
        LEFT JOIN stars d ON d.id = m.id_director
        WHERE m.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let director = match row.try_get::<Option<i32>, _>("director_id")? {
        Some(director_id) => Some(Star {
            id: director_id,
            name: row.try_get("director_name")?,
            birthdate: row.try_get("director_birthdate")?,
        }),
        None => None,
    };

    let actors = sqlx::query_as::<_, Star>(
        r#"
        SELECT s.id, s.name, s.birthdate
        FROM play p
        JOIN stars s ON s.id = p.id_actor
        WHERE p.id_movie = $1
        ORDER BY p.position, s.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(MovieDetail {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
        duration: row.try_get("duration")?,
        director,
        actors,
    }))
}
