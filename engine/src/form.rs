//! Add/edit form lifecycle.

use crate::error::{FieldError, Result};
use crate::{Book, BookDraft, BookId, Error};
use serde::{Deserialize, Serialize};

/// Whether the open form creates a new book or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FormMode {
    Add,
    Edit { target: Book },
}

/// What an accepted submit asks the record store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(Book),
    Update(Book),
}

impl Submission {
    pub fn book(&self) -> &Book {
        match self {
            Submission::Create(book) | Submission::Update(book) => book,
        }
    }

    pub fn into_book(self) -> Book {
        match self {
            Submission::Create(book) | Submission::Update(book) => book,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Submission::Create(_))
    }
}

/// The book form, closed or open with its current draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum BookForm {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        draft: BookDraft,
        /// Field errors from the last rejected submit
        errors: Vec<FieldError>,
    },
}

impl BookForm {
    /// Open an empty form for a new book.
    pub fn open_add(&mut self) {
        *self = BookForm::Open {
            mode: FormMode::Add,
            draft: BookDraft::default(),
            errors: Vec::new(),
        };
    }

    /// Open a form pre-populated from `book`.
    pub fn open_edit(&mut self, book: Book) {
        *self = BookForm::Open {
            draft: BookDraft::from(&book),
            mode: FormMode::Edit { target: book },
            errors: Vec::new(),
        };
    }

    pub fn close(&mut self) {
        *self = BookForm::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, BookForm::Open { .. })
    }

    pub fn mode(&self) -> Option<&FormMode> {
        match self {
            BookForm::Open { mode, .. } => Some(mode),
            BookForm::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&BookDraft> {
        match self {
            BookForm::Open { draft, .. } => Some(draft),
            BookForm::Closed => None,
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            BookForm::Open { errors, .. } => errors,
            BookForm::Closed => &[],
        }
    }

    /// Submit `draft` against the open form.
    ///
    /// On success the form closes and the validated book is returned. In add
    /// mode the draft's own id is used when present, otherwise `fresh_id` is
    /// called; in edit mode the target's id always wins. On a validation
    /// failure the form stays open holding the draft and its field errors.
    pub fn submit(
        &mut self,
        draft: BookDraft,
        fresh_id: impl FnOnce() -> BookId,
    ) -> Result<Submission> {
        let BookForm::Open { mode, .. } = self else {
            return Err(Error::FormNotOpen);
        };

        let result = match mode {
            FormMode::Add => {
                let id = draft.id.clone().unwrap_or_else(fresh_id);
                draft.validate(id).map(Submission::Create)
            }
            FormMode::Edit { target } => draft
                .validate(target.id.clone())
                .map(Submission::Update),
        };

        match result {
            Ok(submission) => {
                self.close();
                Ok(submission)
            }
            Err(err) => {
                if let BookForm::Open {
                    draft: current,
                    errors,
                    ..
                } = self
                {
                    *errors = err.field_errors().to_vec();
                    *current = draft;
                }
                Err(err)
            }
        }
    }
}
