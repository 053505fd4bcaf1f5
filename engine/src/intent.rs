//! Intents sent by the presentation layer.
//!
//! Every user action is expressed as an intent, not as a direct mutation.
//! All intents are JSON-encoded and tagged by `type` in camelCase.

use crate::{Book, BookDraft, Genre, Status};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A user action the state layer reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    /// Open the form for a new book.
    AddRequested,
    /// Open the form pre-populated with `book`.
    EditRequested { book: Book },
    /// Stage `book` for deletion; nothing is sent yet.
    DeleteRequested { book: Book },
    /// Delete the staged book.
    ConfirmDelete,
    /// Drop the staged book.
    CancelDelete,
    SearchChanged {
        #[serde(default)]
        text: String,
    },
    /// An empty or missing genre clears the filter.
    GenreFilterChanged {
        #[serde(default, deserialize_with = "empty_as_none")]
        genre: Option<Genre>,
    },
    /// An empty or missing status clears the filter.
    StatusFilterChanged {
        #[serde(default, deserialize_with = "empty_as_none")]
        status: Option<Status>,
    },
    PageChanged { page: u32 },
    PreviousPage,
    NextPage,
    FormSubmitted { draft: BookDraft },
    FormClosed,
    /// Re-fetch the whole collection.
    Reload,
}

impl Intent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::AddRequested => "addRequested",
            Intent::EditRequested { .. } => "editRequested",
            Intent::DeleteRequested { .. } => "deleteRequested",
            Intent::ConfirmDelete => "confirmDelete",
            Intent::CancelDelete => "cancelDelete",
            Intent::SearchChanged { .. } => "searchChanged",
            Intent::GenreFilterChanged { .. } => "genreFilterChanged",
            Intent::StatusFilterChanged { .. } => "statusFilterChanged",
            Intent::PageChanged { .. } => "pageChanged",
            Intent::PreviousPage => "previousPage",
            Intent::NextPage => "nextPage",
            Intent::FormSubmitted { .. } => "formSubmitted",
            Intent::FormClosed => "formClosed",
            Intent::Reload => "reload",
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}
