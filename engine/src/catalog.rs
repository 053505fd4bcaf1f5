//! Catalog - the in-memory state container.
//!
//! The Catalog holds the last confirmed copy of the record store together
//! with the user's filter and page selection. It never patches individual
//! records: the collection only changes by wholesale replacement with a
//! fresh fetch. Every setter recomputes the derived view.

use crate::view::{self, Filter, PageView};
use crate::{Book, Genre, Status};

/// The local book collection plus the inputs of the derived view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Books in the order the record store returned them
    books: Vec<Book>,
    /// Current search/genre/status selection
    filter: Filter,
    /// Current page (1-based)
    page: u32,
    /// View derived from the fields above
    view: PageView,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog on page 1 with no filter.
    pub fn new() -> Self {
        let filter = Filter::default();
        let view = view::derive(&[], &filter, 1);
        Self {
            books: Vec::new(),
            filter,
            page: 1,
            view,
        }
    }

    /// Replace the whole collection with the result of a list fetch.
    ///
    /// The page is left as it was; a page that no longer exists simply
    /// derives to an empty slice.
    pub fn replace_all(&mut self, books: Vec<Book>) {
        self.books = books;
        self.recompute();
    }

    /// Get all books, in store order.
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    /// Count of books in the collection.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// The current derived view.
    pub fn view(&self) -> &PageView {
        &self.view
    }

    /// Set the search text. Resets to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        self.page = 1;
        self.recompute();
    }

    /// Set or clear the genre filter. Resets to page 1.
    pub fn set_genre(&mut self, genre: Option<Genre>) {
        self.filter.genre = genre;
        self.page = 1;
        self.recompute();
    }

    /// Set or clear the status filter. Resets to page 1.
    pub fn set_status(&mut self, status: Option<Status>) {
        self.filter.status = status;
        self.page = 1;
        self.recompute();
    }

    /// Jump to a page. Values below 1 become 1; values past the last page
    /// are kept and derive to an empty slice.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.recompute();
    }

    /// Step back one page, never below 1.
    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Step forward one page, never past the last page.
    pub fn next_page(&mut self) {
        let last = self.view.total_pages.max(1);
        self.set_page(self.page.saturating_add(1).min(last));
    }

    fn recompute(&mut self) {
        self.view = view::derive(&self.books, &self.filter, self.page);
    }
}
