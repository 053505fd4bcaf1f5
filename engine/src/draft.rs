//! Book drafts and their validation.
//!
//! A draft is what the form layer submits: every field is raw text. A draft
//! must validate before it can become a [`Book`] and reach the record store.

use crate::book::{is_four_digits, optional_string_or_number, string_or_number};
use crate::error::{Field, FieldError, Result};
use crate::{Book, BookId, Error, Genre, Status, Year};
use serde::{Deserialize, Serialize};

/// Unvalidated book input from the form layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_string_or_number"
    )]
    pub id: Option<BookId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    Status::default().as_str().to_string()
}

impl Default for BookDraft {
    /// Empty form defaults: no genre chosen, status `Available`.
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            author: String::new(),
            genre: String::new(),
            year: String::new(),
            status: default_status(),
        }
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id.clone()),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.as_str().to_string(),
            year: book.year.as_str().to_string(),
            status: book.status.as_str().to_string(),
        }
    }
}

impl BookDraft {
    /// Check every field, collecting all failures rather than stopping at
    /// the first one.
    pub fn check(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new(Field::Title, "Title is required"));
        }
        if self.author.trim().is_empty() {
            errors.push(FieldError::new(Field::Author, "Author is required"));
        }

        if self.genre.is_empty() {
            errors.push(FieldError::new(Field::Genre, "Genre is required"));
        } else if self.genre.parse::<Genre>().is_err() {
            errors.push(FieldError::new(Field::Genre, "Please select a valid genre"));
        }

        if self.year.is_empty() {
            errors.push(FieldError::new(Field::Year, "Year is required"));
        } else if !is_four_digits(&self.year) {
            errors.push(FieldError::new(
                Field::Year,
                "Please enter a valid 4-digit year",
            ));
        }

        if self.status.is_empty() {
            errors.push(FieldError::new(Field::Status, "Status is required"));
        } else if self.status.parse::<Status>().is_err() {
            errors.push(FieldError::new(
                Field::Status,
                "Please select a valid status",
            ));
        }

        errors
    }

    /// Validate the draft and build the full record under `id`.
    ///
    /// Title and author are stored trimmed.
    pub fn validate(&self, id: impl Into<BookId>) -> Result<Book> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        Ok(Book {
            id: id.into(),
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: self.genre.parse()?,
            year: Year::parse(&self.year)?,
            status: self.status.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_draft() -> BookDraft {
        BookDraft {
            id: None,
            title: "X".into(),
            author: "Y".into(),
            genre: "Fantasy".into(),
            year: "2020".into(),
            status: "Available".into(),
        }
    }

    #[test]
    fn default_draft_is_available_without_genre() {
        let draft = BookDraft::default();
        assert_eq!(draft.status, "Available");
        assert!(draft.genre.is_empty());
        assert!(draft.id.is_none());
    }

    #[test]
    fn valid_draft_becomes_book() {
        let book = valid_draft().validate("id-1").unwrap();
        assert_eq!(book.id, "id-1");
        assert_eq!(book.genre, Genre::Fantasy);
        assert_eq!(book.year.as_str(), "2020");
        assert_eq!(book.status, Status::Available);
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let draft = BookDraft {
            status: String::new(),
            ..BookDraft::default()
        };
        let fields: Vec<Field> = draft.check().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Title,
                Field::Author,
                Field::Genre,
                Field::Year,
                Field::Status
            ]
        );
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let draft = BookDraft {
            title: "   ".into(),
            ..valid_draft()
        };
        let err = draft.validate("id").unwrap_err();
        assert_eq!(
            err.field_errors(),
            &[FieldError::new(Field::Title, "Title is required")]
        );
    }

    #[test]
    fn year_pattern_is_strict() {
        for bad in ["20", "20200", "20a0", " 2020", "-202"] {
            let draft = BookDraft {
                year: bad.into(),
                ..valid_draft()
            };
            let errors = draft.check();
            assert_eq!(errors.len(), 1, "year {bad:?}");
            assert_eq!(errors[0].message, "Please enter a valid 4-digit year");
        }
    }

    #[test]
    fn unknown_vocabulary_is_rejected() {
        let draft = BookDraft {
            genre: "Poetry".into(),
            status: "Lost".into(),
            ..valid_draft()
        };
        let fields: Vec<Field> = draft.check().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Genre, Field::Status]);
    }

    #[test]
    fn draft_from_book_roundtrips() {
        let book = valid_draft().validate("keep-me").unwrap();
        let draft = BookDraft::from(&book);
        assert_eq!(draft.id.as_deref(), Some("keep-me"));
        assert_eq!(draft.validate("keep-me").unwrap(), book);
    }

    #[test]
    fn deserializes_form_payload() {
        let draft: BookDraft = serde_json::from_value(json!({
            "title": "X",
            "author": "Y",
            "genre": "Fantasy",
            "year": 2020
        }))
        .unwrap();
        assert_eq!(draft.year, "2020");
        assert_eq!(draft.status, "Available");
        assert!(draft.id.is_none());

        let with_empty_id: BookDraft =
            serde_json::from_value(json!({"id": "", "title": "X"})).unwrap();
        assert!(with_empty_id.id.is_none());
    }
}
