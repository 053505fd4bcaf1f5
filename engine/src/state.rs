//! Shelf - the single owned state object behind the user interface.
//!
//! `Shelf` applies intents and the outcomes of network calls. It performs
//! no IO itself: applying an intent returns an [`Effect`] describing the
//! network work the caller must carry out, and the caller reports the
//! outcome back through the `*_succeeded` / `*_failed` methods.

use crate::catalog::Catalog;
use crate::confirm::DeleteConfirmation;
use crate::error::Result;
use crate::form::{BookForm, Submission};
use crate::notification::NotificationSlot;
use crate::{Book, BookId, Intent, Snapshot};

pub const LOAD_FAILED: &str = "Failed to load books. Please start the record store.";
pub const SAVE_FAILED: &str = "Failed to save book.";
pub const DELETE_FAILED: &str = "Failed to delete book.";
pub const CREATED: &str = "New book added successfully!";
pub const UPDATED: &str = "Book updated successfully!";
pub const DELETED: &str = "Book deleted successfully!";

/// Which write a mutation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Remove,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::Create => write!(f, "create"),
            MutationKind::Update => write!(f, "update"),
            MutationKind::Remove => write!(f, "remove"),
        }
    }
}

/// A write to send to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create(Book),
    Update(Book),
    Remove(Book),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Create,
            Mutation::Update(_) => MutationKind::Update,
            Mutation::Remove(_) => MutationKind::Remove,
        }
    }

    pub fn book(&self) -> &Book {
        match self {
            Mutation::Create(book) | Mutation::Update(book) | Mutation::Remove(book) => book,
        }
    }
}

impl From<Submission> for Mutation {
    fn from(submission: Submission) -> Self {
        match submission {
            Submission::Create(book) => Mutation::Create(book),
            Submission::Update(book) => Mutation::Update(book),
        }
    }
}

/// Network work requested by an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Purely local change.
    None,
    /// Re-fetch the whole collection.
    Fetch,
    /// Perform the write, then re-fetch if it succeeded.
    Mutate(Mutation),
}

/// All state shared by the user interface.
#[derive(Debug, Clone, Default)]
pub struct Shelf {
    catalog: Catalog,
    notification: NotificationSlot,
    confirmation: DeleteConfirmation,
    form: BookForm,
    /// List fetches issued but not yet completed
    pending_fetches: usize,
    /// Sequence number of the newest fetch applied to the catalog
    latest_fetch: u64,
}

impl Shelf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn notification(&self) -> &NotificationSlot {
        &self.notification
    }

    pub fn confirmation(&self) -> &DeleteConfirmation {
        &self.confirmation
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    /// True while any list fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_fetches > 0
    }

    /// Apply a user intent.
    ///
    /// `fresh_id` is called only when a new book needs an identifier. An
    /// `Err` means the intent was rejected locally (for example a draft that
    /// failed validation); no network work is requested in that case.
    pub fn apply(&mut self, intent: Intent, fresh_id: impl FnOnce() -> BookId) -> Result<Effect> {
        let effect = match intent {
            Intent::AddRequested => {
                self.form.open_add();
                Effect::None
            }
            Intent::EditRequested { book } => {
                self.form.open_edit(book);
                Effect::None
            }
            Intent::FormClosed => {
                self.form.close();
                Effect::None
            }
            Intent::FormSubmitted { draft } => {
                let submission = self.form.submit(draft, fresh_id)?;
                Effect::Mutate(submission.into())
            }
            Intent::DeleteRequested { book } => {
                self.confirmation.request(book);
                Effect::None
            }
            Intent::ConfirmDelete => match self.confirmation.confirm() {
                Some(book) => Effect::Mutate(Mutation::Remove(book)),
                None => Effect::None,
            },
            Intent::CancelDelete => {
                self.confirmation.cancel();
                Effect::None
            }
            Intent::SearchChanged { text } => {
                self.catalog.set_search(text);
                Effect::None
            }
            Intent::GenreFilterChanged { genre } => {
                self.catalog.set_genre(genre);
                Effect::None
            }
            Intent::StatusFilterChanged { status } => {
                self.catalog.set_status(status);
                Effect::None
            }
            Intent::PageChanged { page } => {
                self.catalog.set_page(page);
                Effect::None
            }
            Intent::PreviousPage => {
                self.catalog.previous_page();
                Effect::None
            }
            Intent::NextPage => {
                self.catalog.next_page();
                Effect::None
            }
            Intent::Reload => {
                self.pending_fetches += 1;
                Effect::Fetch
            }
        };

        Ok(effect)
    }

    /// A list fetch completed; replace the collection wholesale.
    ///
    /// `seq` orders fetches by the time they were issued. A result older
    /// than one already applied is discarded, though the fetch still counts
    /// as finished. Returns whether the collection was replaced.
    pub fn fetch_succeeded(&mut self, seq: u64, books: Vec<Book>) -> bool {
        self.finish_fetch();
        if seq <= self.latest_fetch {
            return false;
        }
        self.latest_fetch = seq;
        self.catalog.replace_all(books);
        true
    }

    /// A list fetch failed. The collection is left as it was.
    ///
    /// Returns the generation of the notification shown.
    pub fn fetch_failed(&mut self) -> u64 {
        self.finish_fetch();
        self.notification.info(LOAD_FAILED)
    }

    /// A list fetch ended without reporting an outcome.
    pub fn fetch_abandoned(&mut self) {
        self.finish_fetch();
    }

    /// A write succeeded. Announces it and marks the follow-up fetch as
    /// outstanding; the caller must now re-fetch and report the result.
    pub fn mutation_succeeded(&mut self, kind: MutationKind) -> u64 {
        self.pending_fetches += 1;
        match kind {
            MutationKind::Create => self.notification.success(CREATED),
            MutationKind::Update => self.notification.success(UPDATED),
            MutationKind::Remove => self.notification.info(DELETED),
        }
    }

    /// A write failed. The collection is left as it was.
    pub fn mutation_failed(&mut self, kind: MutationKind) -> u64 {
        match kind {
            MutationKind::Create | MutationKind::Update => self.notification.info(SAVE_FAILED),
            MutationKind::Remove => self.notification.info(DELETE_FAILED),
        }
    }

    /// Clear the notification shown under `generation`, if still current.
    pub fn expire_notification(&mut self, generation: u64) -> bool {
        self.notification.expire(generation)
    }

    /// Everything the presentation layer needs to render.
    pub fn snapshot(&self) -> Snapshot {
        let view = self.catalog.view();
        Snapshot {
            view: view.clone(),
            has_previous: view.has_previous(),
            has_next: view.has_next(),
            filter: self.catalog.filter().clone(),
            loading: self.is_loading(),
            notification: self.notification.current().cloned(),
            pending_delete: self.confirmation.pending().cloned(),
            confirm_prompt: self.confirmation.prompt(),
            form: self.form.clone(),
        }
    }

    fn finish_fetch(&mut self) {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
    }
}
