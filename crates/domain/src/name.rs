use derive_more::{AsRef, Display};

/// Display name of a routine, variant or exercise.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// Free-text notes attached to an exercise during a workout.
#[derive(AsRef, Debug, Display, Default, Clone, PartialEq, Eq)]
pub struct Notes(String);

impl Notes {
    pub const MAX_LEN: usize = 150;

    pub fn new(text: &str) -> Result<Self, NotesError> {
        let len = text.chars().count();

        if len > Self::MAX_LEN {
            return Err(NotesError::TooLong(len));
        }

        Ok(Notes(text.to_string()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NotesError {
    #[error("Notes must be 150 characters or fewer ({0} > 150)")]
    TooLong(usize),
}
