//! Route handlers organized by resource

pub mod cast;
pub mod health;
pub mod movies;
pub mod stars;
pub mod stats;
