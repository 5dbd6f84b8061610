//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Single-row reads/writes return `Option` (absence is not an error)
//! - List operations use JOINs or EXISTS (no N+1)
//! - Relationship writes run in one transaction with row locks

pub mod cast;
pub mod movies;
pub mod stars;
pub mod stats;

pub use cast::{CastRepo, DirectorLookup, LinkOutcome};
pub use movies::{Movie, MovieDetail, MovieRepo};
pub use stars::{Star, StarRepo};
pub use stats::{
    DurationStats, StarCareer, StarFirstYear, StarLastYear, StarMovieCount, StatsRepo, YearCount,
};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
