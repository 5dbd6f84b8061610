//! Movie input validation
//!
//! Title: 1-400 characters, not blank. Year: 1..=32767.
//! Duration (minutes) is optional but must be positive when given.

use super::validation::{bounded_text, ValidationError};

/// Maximum length for movie titles (matches the VARCHAR(400) column)
pub const MAX_TITLE_LEN: usize = 400;

/// Validated scalar fields of a movie, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    title: String,
    year: i16,
    duration: Option<i16>,
}

impl MovieDraft {
    /// Validate movie fields.
    ///
    /// # Example
    /// ```
    /// use cinedb_server::models::MovieDraft;
    ///
    /// assert!(MovieDraft::new("Inception", 2010, Some(148)).is_ok());
    /// assert!(MovieDraft::new("", 2010, None).is_err());
    /// assert!(MovieDraft::new("Inception", 2010, Some(0)).is_err());
    /// ```
    pub fn new(title: &str, year: i16, duration: Option<i16>) -> Result<Self, ValidationError> {
        bounded_text(title, "title", MAX_TITLE_LEN)?;

        if year < 1 {
            return Err(ValidationError::OutOfRange {
                field: "year",
                min: 1,
                max: i64::from(i16::MAX),
            });
        }

        if matches!(duration, Some(d) if d < 1) {
            return Err(ValidationError::OutOfRange {
                field: "duration",
                min: 1,
                max: i64::from(i16::MAX),
            });
        }

        Ok(Self {
            title: title.to_owned(),
            year,
            duration,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i16 {
        self.year
    }

    pub fn duration(&self) -> Option<i16> {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_movie_without_duration() {
        let draft = MovieDraft::new("Metropolis", 1927, None).unwrap();
        assert_eq!(draft.title(), "Metropolis");
        assert_eq!(draft.year(), 1927);
        assert_eq!(draft.duration(), None);
    }

    #[test]
    fn rejects_blank_title() {
        let err = MovieDraft::new("  ", 2000, None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "title" });
    }

    #[test]
    fn title_length_limit() {
        let title = "a".repeat(MAX_TITLE_LEN);
        assert!(MovieDraft::new(&title, 2000, None).is_ok());

        let title = "a".repeat(MAX_TITLE_LEN + 1);
        let err = MovieDraft::new(&title, 2000, None).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 400, .. }));
    }

    #[test]
    fn rejects_non_positive_year_and_duration() {
        let err = MovieDraft::new("Zero", 0, None).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "year", .. }));

        let err = MovieDraft::new("Negative", 1999, Some(-5)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "duration",
                ..
            }
        ));
    }
}
