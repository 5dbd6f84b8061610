//! Query filters shared by search and statistics endpoints

use serde::Deserialize;

use super::ValidationError;

/// Inclusive year interval; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct YearRange {
    pub year_min: Option<i16>,
    pub year_max: Option<i16>,
}

impl YearRange {
    pub fn new(year_min: Option<i16>, year_max: Option<i16>) -> Self {
        Self { year_min, year_max }
    }

    /// True when both bounds are set and cross, so nothing can match.
    pub fn is_empty(&self) -> bool {
        matches!((self.year_min, self.year_max), (Some(lo), Some(hi)) if lo > hi)
    }
}

/// Lower bound on the number of movies a star must have to appear in a
/// statistics result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCount(i64);

impl MinCount {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::OutOfRange {
                field: "min_count",
                min: 0,
                max: i64::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Default for MinCount {
    fn default() -> Self {
        Self(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossed_bounds_are_empty() {
        assert!(YearRange::new(Some(2010), Some(2000)).is_empty());
    }

    #[test]
    fn open_or_ordered_bounds_are_not_empty() {
        assert!(!YearRange::new(Some(2000), Some(2000)).is_empty());
        assert!(!YearRange::new(Some(2000), Some(2010)).is_empty());
        assert!(!YearRange::new(Some(2010), None).is_empty());
        assert!(!YearRange::new(None, Some(1950)).is_empty());
        assert!(!YearRange::default().is_empty());
    }

    #[test]
    fn min_count_rejects_negative() {
        assert!(MinCount::new(-1).is_err());
        assert_eq!(MinCount::new(0).unwrap().get(), 0);
        assert_eq!(MinCount::default().get(), 1);
    }
}
