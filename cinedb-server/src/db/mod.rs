//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no global session
//! - Every repository call borrows a pooled connection for its own duration
//! - Absence is `Option` or an outcome enum, never an error
//! - Transactions for multi-step relationship writes

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{connect, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
