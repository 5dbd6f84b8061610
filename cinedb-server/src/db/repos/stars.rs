//! Star repository
//!
//! Plain CRUD plus name and birth-year lookups. Deleting a star relies on the
//! foreign-key rules: its directed movies lose their director and its cast
//! entries are removed.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{Pagination, StarDraft};

/// Star record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Star {
    pub id: i32,
    pub name: String,
    pub birthdate: NaiveDate,
}

/// Star repository
pub struct StarRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StarRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single star by id.
    pub async fn get(&self, id: i32) -> Result<Option<Star>, DbError> {
        let star = sqlx::query_as::<_, Star>("SELECT id, name, birthdate FROM stars WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(star)
    }

    /// List stars in id order.
    pub async fn list(&self, page: Pagination) -> Result<Vec<Star>, DbError> {
        let stars = sqlx::query_as::<_, Star>(
            r#"
            SELECT id, name, birthdate
            FROM stars
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(stars)
    }

    pub async fn list_all(&self) -> Result<Vec<Star>, DbError> {
        let stars =
            sqlx::query_as::<_, Star>("SELECT id, name, birthdate FROM stars ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(stars)
    }

    /// Stars whose name is exactly `name`.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Star>, DbError> {
        let stars = sqlx::query_as::<_, Star>(
            "SELECT id, name, birthdate FROM stars WHERE name = $1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(self.pool)
        .await?;

        Ok(stars)
    }

    /// Stars whose name contains `part` (case-sensitive, taken literally).
    pub async fn find_by_name_part(&self, part: &str) -> Result<Vec<Star>, DbError> {
        let stars = sqlx::query_as::<_, Star>(
            "SELECT id, name, birthdate FROM stars WHERE strpos(name, $1) > 0 ORDER BY id",
        )
        .bind(part)
        .fetch_all(self.pool)
        .await?;

        Ok(stars)
    }

    /// Stars born during calendar year `year`. Years no birthdate can fall
    /// in (0, or beyond the date range) match nothing.
    pub async fn find_by_birthyear(&self, year: i32) -> Result<Vec<Star>, DbError> {
        let stars = sqlx::query_as::<_, Star>(
            r#"
            SELECT id, name, birthdate
            FROM stars
            WHERE EXTRACT(YEAR FROM birthdate) = $1::int4
            ORDER BY birthdate, id
            "#,
        )
        .bind(year)
        .fetch_all(self.pool)
        .await?;

        Ok(stars)
    }

    pub async fn create(&self, draft: &StarDraft) -> Result<Star, DbError> {
        let star = sqlx::query_as::<_, Star>(
            r#"
            INSERT INTO stars (name, birthdate)
            VALUES ($1, $2)
            RETURNING id, name, birthdate
            "#,
        )
        .bind(draft.name())
        .bind(draft.birthdate())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(star_id = star.id, name = %star.name, "Star created");
        Ok(star)
    }

    /// Overwrite name and birthdate. Returns `None` when `id` is unknown.
    pub async fn update(&self, id: i32, draft: &StarDraft) -> Result<Option<Star>, DbError> {
        let star = sqlx::query_as::<_, Star>(
            r#"
            UPDATE stars
            SET name = $2, birthdate = $3
            WHERE id = $1
            RETURNING id, name, birthdate
            "#,
        )
        .bind(id)
        .bind(draft.name())
        .bind(draft.birthdate())
        .fetch_optional(self.pool)
        .await?;

        Ok(star)
    }

    /// Delete a star, returning the removed row.
    pub async fn delete(&self, id: i32) -> Result<Option<Star>, DbError> {
        let star = sqlx::query_as::<_, Star>(
            "DELETE FROM stars WHERE id = $1 RETURNING id, name, birthdate",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        if let Some(star) = &star {
            tracing::debug!(star_id = star.id, "Star deleted");
        }
        Ok(star)
    }
}
