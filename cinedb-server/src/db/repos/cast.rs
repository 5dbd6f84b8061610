//! Cast repository - who directed and who acted in which movie
//!
//! Writes lock the referenced stars (`FOR SHARE`, in id order) and then the
//! movie row (`FOR UPDATE`) inside one transaction, so the existence checks
//! and the write cannot be interleaved with a concurrent delete. The lock
//! order must stay stars-then-movie: deleting a star locks the star before
//! its `ON DELETE` actions reach movies and cast rows.
//!
//! The `play` table has set semantics: a star appears at most once in a
//! movie's cast.

use std::collections::HashSet;

use sqlx::{PgConnection, PgPool, Row};

use super::movies::{fetch_detail, MovieDetail};
use super::{DbError, Star};

/// Result of looking up the director of a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorLookup {
    Found(Star),
    NoDirector,
    MovieNotFound,
}

/// Result of a relationship write. The movie and the stars are reported
/// separately so callers can tell which reference failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome<T> {
    Linked(T),
    MovieNotFound,
    /// Star ids that do not exist, in request order
    StarsNotFound(Vec<i32>),
}

/// Cast repository
pub struct CastRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CastRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Director of a movie, distinguishing a missing movie from a movie
    /// without a director.
    pub async fn director_of(&self, movie_id: i32) -> Result<DirectorLookup, DbError> {
        let row = sqlx::query(
            r#"
            SELECT s.id, s.name, s.birthdate
            FROM movies m
            LEFT JOIN stars s ON s.id = m.id_director
            WHERE m.id = $1
            "#,
        )
        .bind(movie_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(DirectorLookup::MovieNotFound);
        };

        let lookup = match row.try_get::<Option<i32>, _>("id")? {
            Some(id) => DirectorLookup::Found(Star {
                id,
                name: row.try_get("name")?,
                birthdate: row.try_get("birthdate")?,
            }),
            None => DirectorLookup::NoDirector,
        };

        Ok(lookup)
    }

    /// Cast of every movie whose title contains `part`, one list per movie.
    ///
    /// Movies are in id order and each list follows cast order. Movies
    /// without actors are left out.
    pub async fn actors_by_title_part(&self, part: &str) -> Result<Vec<Vec<Star>>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id_movie, s.id, s.name, s.birthdate
            FROM movies m
            JOIN play p ON p.id_movie = m.id
            JOIN stars s ON s.id = p.id_actor
            WHERE strpos(m.title, $1) > 0
            ORDER BY m.id, p.position, s.id
            "#,
        )
        .bind(part)
        .fetch_all(self.pool)
        .await?;

        let mut casts: Vec<Vec<Star>> = Vec::new();
        let mut current_movie = None;

        for row in rows {
            let movie_id: i32 = row.try_get("id_movie")?;
            let star = Star {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                birthdate: row.try_get("birthdate")?,
            };

            match casts.last_mut() {
                Some(cast) if current_movie == Some(movie_id) => cast.push(star),
                _ => {
                    current_movie = Some(movie_id);
                    casts.push(vec![star]);
                }
            }
        }

        Ok(casts)
    }

    /// Make `star_id` the director of `movie_id`.
    pub async fn assign_director(
        &self,
        movie_id: i32,
        star_id: i32,
    ) -> Result<LinkOutcome<MovieDetail>, DbError> {
        let mut tx = self.pool.begin().await?;

        let missing = lock_stars(&mut *tx, &[star_id]).await?;
        if !lock_movie(&mut *tx, movie_id).await? {
            return Ok(LinkOutcome::MovieNotFound);
        }
        if !missing.is_empty() {
            return Ok(LinkOutcome::StarsNotFound(missing));
        }

        sqlx::query("UPDATE movies SET id_director = $2 WHERE id = $1")
            .bind(movie_id)
            .bind(star_id)
            .execute(&mut *tx)
            .await?;

        let outcome = finish(&mut *tx, movie_id).await?;
        tx.commit().await?;

        tracing::debug!(movie_id, star_id, "Director assigned");
        Ok(outcome)
    }

    /// Add `star_id` at the end of the cast of `movie_id`. Adding a star that
    /// is already in the cast leaves the cast unchanged.
    pub async fn append_actor(
        &self,
        movie_id: i32,
        star_id: i32,
    ) -> Result<LinkOutcome<MovieDetail>, DbError> {
        let mut tx = self.pool.begin().await?;

        let missing = lock_stars(&mut *tx, &[star_id]).await?;
        if !lock_movie(&mut *tx, movie_id).await? {
            return Ok(LinkOutcome::MovieNotFound);
        }
        if !missing.is_empty() {
            return Ok(LinkOutcome::StarsNotFound(missing));
        }

        sqlx::query(
            r#"
            INSERT INTO play (id_movie, id_actor, position)
            SELECT $1::int4, $2::int4, COALESCE(MAX(position), 0) + 1
            FROM play
            WHERE id_movie = $1
            ON CONFLICT (id_movie, id_actor) DO NOTHING
            "#,
        )
        .bind(movie_id)
        .bind(star_id)
        .execute(&mut *tx)
        .await?;

        let outcome = finish(&mut *tx, movie_id).await?;
        tx.commit().await?;

        tracing::debug!(movie_id, star_id, "Actor appended");
        Ok(outcome)
    }

    /// Replace the whole cast of `movie_id` with `star_ids`, in the given
    /// order. Repeated ids are kept once, at their first position. If any id
    /// is unknown nothing is changed.
    pub async fn replace_actors(
        &self,
        movie_id: i32,
        star_ids: &[i32],
    ) -> Result<LinkOutcome<MovieDetail>, DbError> {
        let star_ids = dedup_in_order(star_ids);
        let mut tx = self.pool.begin().await?;

        let missing = lock_stars(&mut *tx, &star_ids).await?;
        if !lock_movie(&mut *tx, movie_id).await? {
            return Ok(LinkOutcome::MovieNotFound);
        }
        if !missing.is_empty() {
            return Ok(LinkOutcome::StarsNotFound(missing));
        }

        sqlx::query("DELETE FROM play WHERE id_movie = $1")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO play (id_movie, id_actor, position)
            SELECT $1::int4, a.id_actor, a.ord
            FROM UNNEST($2::int4[]) WITH ORDINALITY AS a(id_actor, ord)
            "#,
        )
        .bind(movie_id)
        .bind(star_ids.as_slice())
        .execute(&mut *tx)
        .await?;

        let outcome = finish(&mut *tx, movie_id).await?;
        tx.commit().await?;

        tracing::debug!(movie_id, actors = star_ids.len(), "Cast replaced");
        Ok(outcome)
    }
}

/// Lock the movie row for the rest of the transaction. False if it does not
/// exist.
async fn lock_movie(conn: &mut PgConnection, movie_id: i32) -> Result<bool, DbError> {
    let found = sqlx::query_scalar::<_, i32>("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
        .bind(movie_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(found.is_some())
}

/// Share-lock the given stars and return the ids that do not exist.
async fn lock_stars(conn: &mut PgConnection, star_ids: &[i32]) -> Result<Vec<i32>, DbError> {
    if star_ids.is_empty() {
        return Ok(Vec::new());
    }

    let found: HashSet<i32> = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM stars WHERE id = ANY($1) ORDER BY id FOR SHARE",
    )
    .bind(star_ids)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .collect();

    Ok(star_ids
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect())
}

/// Reload the movie after a write, inside the same transaction.
async fn finish(
    conn: &mut PgConnection,
    movie_id: i32,
) -> Result<LinkOutcome<MovieDetail>, DbError> {
    Ok(match fetch_detail(conn, movie_id).await? {
        Some(detail) => LinkOutcome::Linked(detail),
        None => LinkOutcome::MovieNotFound,
    })
}

fn dedup_in_order(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
