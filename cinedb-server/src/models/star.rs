//! Star input validation

use chrono::NaiveDate;

use super::validation::{bounded_text, ValidationError};

/// Maximum length for star names (matches the VARCHAR(150) column)
pub const MAX_NAME_LEN: usize = 150;

/// Validated scalar fields of a star, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarDraft {
    name: String,
    birthdate: NaiveDate,
}

impl StarDraft {
    pub fn new(name: &str, birthdate: NaiveDate) -> Result<Self, ValidationError> {
        bounded_text(name, "name", MAX_NAME_LEN)?;

        Ok(Self {
            name: name.to_owned(),
            birthdate,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birthdate(&self) -> NaiveDate {
        self.birthdate
    }
}
