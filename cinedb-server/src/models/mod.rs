//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod filters;
pub mod movie;
pub mod pagination;
pub mod star;
pub mod validation;

pub use filters::{MinCount, YearRange};
pub use movie::MovieDraft;
pub use pagination::{Pagination, PaginationParams};
pub use star::StarDraft;
pub use validation::ValidationError;
