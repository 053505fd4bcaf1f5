//! Error types for the Shelf engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A book field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Author,
    Genre,
    Year,
    Status,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Author => write!(f, "author"),
            Field::Genre => write!(f, "genre"),
            Field::Year => write!(f, "year"),
            Field::Status => write!(f, "status"),
        }
    }
}

/// A single rejected field, with the message shown next to it in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All possible errors from the Shelf engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid book: {}", describe(.0))]
    Validation(Vec<FieldError>),

    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("invalid year: {0}")]
    InvalidYear(String),

    #[error("no book form is open")]
    FormNotOpen,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl Error {
    /// Field errors carried by a validation failure, empty for anything else.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::UnknownGenre("Poetry".into());
        assert_eq!(err.to_string(), "unknown genre: Poetry");

        let err = Error::Validation(vec![
            FieldError::new(Field::Title, "Title is required"),
            FieldError::new(Field::Year, "Please enter a valid 4-digit year"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid book: title: Title is required; year: Please enter a valid 4-digit year"
        );
    }

    #[test]
    fn field_errors_only_for_validation() {
        let err = Error::Validation(vec![FieldError::new(Field::Author, "Author is required")]);
        assert_eq!(err.field_errors().len(), 1);
        assert!(Error::InvalidYear("99".into()).field_errors().is_empty());
    }
}
