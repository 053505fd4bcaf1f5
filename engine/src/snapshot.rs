//! Snapshot - what the presentation layer renders.
//!
//! A snapshot is a self-contained copy of everything visible: the current
//! page and whether neighbouring pages exist, the filter, loading flag,
//! notification, staged deletion and form. It serializes to camelCase JSON.

use crate::error::Result;
use crate::form::BookForm;
use crate::notification::Notification;
use crate::view::{Filter, PageView};
use crate::{Book, Error};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the user interface state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The current page of the derived view
    pub view: PageView,
    /// Whether a page precedes the current one
    pub has_previous: bool,
    /// Whether a page follows the current one
    pub has_next: bool,
    /// Filter the view was derived with
    pub filter: Filter,
    /// True while a list fetch is outstanding
    pub loading: bool,
    /// Active notification, if any
    pub notification: Option<Notification>,
    /// Book awaiting delete confirmation
    pub pending_delete: Option<Book>,
    /// Confirmation question for `pending_delete`
    pub confirm_prompt: Option<String>,
    /// The add/edit form
    pub form: BookForm,
}

impl Snapshot {
    /// Serialize to a single line of JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }
}
