//! Offset/limit pagination

use serde::Deserialize;

/// Maximum rows per request
const MAX_LIMIT: u32 = 1000;

/// Default rows per request
const DEFAULT_LIMIT: u32 = 100;

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Rows to skip
    pub skip: u32,
    /// Rows to return (1..=1000)
    pub limit: u32,
}

impl Pagination {
    /// Create pagination, clamping the limit to 1..=1000.
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        i64::from(self.skip)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(
            params.skip.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_empty_params() {
        let p = Pagination::from(PaginationParams::default());
        assert_eq!(p, Pagination::default());
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 100);
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(Pagination::new(0, 0).limit, 1);
        assert_eq!(Pagination::new(0, 5000).limit, 1000);
        assert_eq!(Pagination::new(0, 42).limit, 42);
    }

    #[test]
    fn skip_is_passed_through() {
        let p = Pagination::from(PaginationParams {
            skip: Some(250),
            limit: Some(10),
        });
        assert_eq!(p.offset(), 250);
        assert_eq!(p.limit(), 10);
    }
}
