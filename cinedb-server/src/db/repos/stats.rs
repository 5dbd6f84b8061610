//! Aggregate statistics over movies and their cast
//!
//! All queries are single GROUP BY statements. Per-star results are
//! filtered with `HAVING COUNT(..) >= min_count` and ordered by movie count
//! (descending), then star id.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{DbError, Star};
use crate::models::MinCount;

/// Number of movies released in a year
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct YearCount {
    pub year: i16,
    pub movie_count: i64,
}

/// Duration aggregates for one year. `None` when no movie of that year has a
/// duration.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DurationStats {
    pub year: i16,
    pub min_duration: Option<i16>,
    pub max_duration: Option<i16>,
    pub mean_duration: Option<f64>,
}

/// A star with the number of movies they directed or acted in
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StarMovieCount {
    #[sqlx(flatten)]
    pub star: Star,
    pub movie_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StarFirstYear {
    #[sqlx(flatten)]
    pub star: Star,
    pub first_year: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StarLastYear {
    #[sqlx(flatten)]
    pub star: Star,
    pub last_year: i16,
}

/// First and last release year of an actor's movies, with the movie count
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StarCareer {
    #[sqlx(flatten)]
    pub star: Star,
    pub first_year: i16,
    pub last_year: i16,
    pub movie_count: i64,
}

/// Statistics repository
pub struct StatsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Movie count per year, oldest year first.
    pub async fn movie_count_by_year(&self) -> Result<Vec<YearCount>, DbError> {
        let rows = sqlx::query_as::<_, YearCount>(
            r#"
            SELECT year, COUNT(*) AS movie_count
            FROM movies
            GROUP BY year
            ORDER BY year
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Min, max and mean duration per year, oldest year first.
    pub async fn duration_by_year(&self) -> Result<Vec<DurationStats>, DbError> {
        let rows = sqlx::query_as::<_, DurationStats>(
            r#"
            SELECT
                year,
                MIN(duration) AS min_duration,
                MAX(duration) AS max_duration,
                AVG(duration)::float8 AS mean_duration
            FROM movies
            GROUP BY year
            ORDER BY year
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Directors with at least `min_count` directed movies.
    pub async fn directors(&self, min_count: MinCount) -> Result<Vec<StarMovieCount>, DbError> {
        let rows = sqlx::query_as::<_, StarMovieCount>(
            r#"
            SELECT s.id, s.name, s.birthdate, COUNT(m.id) AS movie_count
            FROM stars s
            JOIN movies m ON m.id_director = s.id
            GROUP BY s.id, s.name, s.birthdate
            HAVING COUNT(m.id) >= $1
            ORDER BY movie_count DESC, s.id
            "#,
        )
        .bind(min_count.get())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Actors with at least `min_count` movies.
    pub async fn actors(&self, min_count: MinCount) -> Result<Vec<StarMovieCount>, DbError> {
        let rows = sqlx::query_as::<_, StarMovieCount>(
            r#"
            SELECT s.id, s.name, s.birthdate, COUNT(p.id_movie) AS movie_count
            FROM stars s
            JOIN play p ON p.id_actor = s.id
            GROUP BY s.id, s.name, s.birthdate
            HAVING COUNT(p.id_movie) >= $1
            ORDER BY movie_count DESC, s.id
            "#,
        )
        .bind(min_count.get())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Year of the first movie of each actor with at least `min_count` movies.
    pub async fn actors_first_year(
        &self,
        min_count: MinCount,
    ) -> Result<Vec<StarFirstYear>, DbError> {
        let rows = sqlx::query_as::<_, StarFirstYear>(
            r#"
            SELECT s.id, s.name, s.birthdate, MIN(m.year) AS first_year
            FROM stars s
            JOIN play p ON p.id_actor = s.id
            JOIN movies m ON m.id = p.id_movie
            GROUP BY s.id, s.name, s.birthdate
            HAVING COUNT(m.id) >= $1
            ORDER BY COUNT(m.id) DESC, s.id
            "#,
        )
        .bind(min_count.get())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Year of the latest movie of each actor with at least `min_count` movies.
    pub async fn actors_last_year(
        &self,
        min_count: MinCount,
    ) -> Result<Vec<StarLastYear>, DbError> {
        let rows = sqlx::query_as::<_, StarLastYear>(
            r#"
            SELECT s.id, s.name, s.birthdate, MAX(m.year) AS last_year
            FROM stars s
            JOIN play p ON p.id_actor = s.id
            JOIN movies m ON m.id = p.id_movie
            GROUP BY s.id, s.name, s.birthdate
            HAVING COUNT(m.id) >= $1
            ORDER BY COUNT(m.id) DESC, s.id
            "#,
        )
        .bind(min_count.get())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// First year, last year and movie count of each actor with at least
    /// `min_count` movies.
    pub async fn actors_career(&self, min_count: MinCount) -> Result<Vec<StarCareer>, DbError> {
        let rows = sqlx::query_as::<_, StarCareer>(
            r#"
            SELECT
                s.id,
                s.name,
                s.birthdate,
                MIN(m.year) AS first_year,
                MAX(m.year) AS last_year,
                COUNT(m.id) AS movie_count
            FROM stars s
            JOIN play p ON p.id_actor = s.id
            JOIN movies m ON m.id = p.id_movie
            GROUP BY s.id, s.name, s.birthdate
            HAVING COUNT(m.id) >= $1
            ORDER BY movie_count DESC, s.id
            "#,
        )
        .bind(min_count.get())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
