//! Deletion confirmation state machine.
//!
//! ```text
//! Idle --request(R)--> Pending(R) --confirm--> Idle   (caller removes R)
//!                      Pending(R) --cancel---> Idle   (nothing happens)
//! ```
//!
//! A request while already pending replaces the staged book.

use crate::Book;

/// Where the delete flow currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(Book),
}

impl DeleteConfirmation {
    /// Stage `book` for deletion. Returns the book it replaced, if any.
    pub fn request(&mut self, book: Book) -> Option<Book> {
        match std::mem::replace(self, DeleteConfirmation::Pending(book)) {
            DeleteConfirmation::Pending(previous) => Some(previous),
            DeleteConfirmation::Idle => None,
        }
    }

    /// Commit the staged deletion, returning the book to remove.
    ///
    /// Returns `None` and stays idle if nothing was staged.
    pub fn confirm(&mut self) -> Option<Book> {
        match std::mem::take(self) {
            DeleteConfirmation::Pending(book) => Some(book),
            DeleteConfirmation::Idle => None,
        }
    }

    /// Drop the staged book. Returns it, if one was staged.
    pub fn cancel(&mut self) -> Option<Book> {
        self.confirm()
    }

    pub fn pending(&self) -> Option<&Book> {
        match self {
            DeleteConfirmation::Pending(book) => Some(book),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, DeleteConfirmation::Pending(_))
    }

    /// Text asking the user to confirm, while a book is staged.
    pub fn prompt(&self) -> Option<String> {
        self.pending().map(|book| {
            format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                book.title
            )
        })
    }
}
