//! View derivation - the filtered, paginated slice of the catalog.
//!
//! Everything here is a pure function of its inputs. The same collection,
//! filter and page always produce the same [`PageView`].

use crate::{Book, Genre, Status};
use serde::{Deserialize, Serialize};

/// Number of books shown per page.
pub const PAGE_SIZE: usize = 10;

/// User-selected narrowing of the catalog.
///
/// An empty search string and `None` genre/status impose no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub search: String,
    pub genre: Option<Genre>,
    pub status: Option<Status>,
}

impl Filter {
    /// Filter with only a search string.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }

    /// Check whether a single book passes the filter.
    pub fn matches(&self, book: &Book) -> bool {
        Matcher::new(self).matches(book)
    }
}

/// A filter with its search needle lowercased once.
struct Matcher<'a> {
    needle: String,
    filter: &'a Filter,
}

impl<'a> Matcher<'a> {
    fn new(filter: &'a Filter) -> Self {
        Self {
            needle: filter.search.to_lowercase(),
            filter,
        }
    }

    fn matches(&self, book: &Book) -> bool {
        let matches_search = self.needle.is_empty()
            || book.title.to_lowercase().contains(&self.needle)
            || book.author.to_lowercase().contains(&self.needle);
        let matches_genre = self.filter.genre.map_or(true, |g| g == book.genre);
        let matches_status = self.filter.status.map_or(true, |s| s == book.status);

        matches_search && matches_genre && matches_status
    }
}

/// One page of the derived view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Books on the requested page, in collection order
    pub books: Vec<Book>,
    /// The requested page number (1-based), echoed back unchanged
    pub page: u32,
    /// ceil(match_count / PAGE_SIZE)
    pub total_pages: u32,
    /// Number of books passing the filter across all pages
    pub match_count: usize,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `match_count` books.
pub fn total_pages(match_count: usize) -> u32 {
    u32::try_from(match_count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

/// Derive the page of `books` selected by `filter` and `page`.
///
/// A page past the end, or page 0, yields an empty slice rather than an
/// error.
pub fn derive(books: &[Book], filter: &Filter, page: u32) -> PageView {
    let matcher = Matcher::new(filter);
    let matches: Vec<&Book> = books.iter().filter(|b| matcher.matches(b)).collect();

    let start = (page as usize)
        .checked_sub(1)
        .and_then(|p| p.checked_mul(PAGE_SIZE))
        .unwrap_or(usize::MAX);

    let slice = matches
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|b| (*b).clone())
        .collect();

    PageView {
        books: slice,
        page,
        total_pages: total_pages(matches.len()),
        match_count: matches.len(),
    }
}
