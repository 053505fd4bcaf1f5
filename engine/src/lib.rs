//! # Shelf Engine
//!
//! Deterministic state core for a small book catalog that mirrors a remote
//! record store.
//!
//! This crate owns the local copy of the collection, the user's filter and
//! page selection, the add/edit form, the delete confirmation and the single
//! notification slot. It derives the paginated view shown to the user.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never talks to the network, reads a clock or
//!   generates random ids. Callers perform the [`Effect`]s it asks for.
//! - **Refresh, never patch**: the collection changes only by wholesale
//!   replacement with a confirmed list fetch ([`Catalog::replace_all`]).
//! - **Derived view**: every state change recomputes the [`PageView`].
//!
//! ## Quick Start
//!
//! ```rust
//! use shelf_engine::{BookDraft, Effect, Intent, Mutation, Shelf};
//!
//! let mut shelf = Shelf::new();
//!
//! // Opening the form and submitting a valid draft asks for a create.
//! shelf.apply(Intent::AddRequested, || unreachable!()).unwrap();
//! let draft = BookDraft {
//!     title: "Dune".into(),
//!     author: "Frank Herbert".into(),
//!     genre: "Science Fiction".into(),
//!     year: "1965".into(),
//!     ..BookDraft::default()
//! };
//! let effect = shelf
//!     .apply(Intent::FormSubmitted { draft }, || "b-1".to_string())
//!     .unwrap();
//! assert!(matches!(effect, Effect::Mutate(Mutation::Create(_))));
//!
//! // The caller performs the write, then the re-fetch, and reports back.
//! shelf.mutation_succeeded(shelf_engine::MutationKind::Create);
//! shelf.fetch_succeeded(1, vec![]);
//! assert!(!shelf.snapshot().loading);
//! ```

pub mod book;
pub mod catalog;
pub mod confirm;
pub mod draft;
pub mod error;
pub mod form;
pub mod intent;
pub mod notification;
pub mod snapshot;
pub mod state;
pub mod view;

// Re-export main types at crate root
pub use book::{Book, Genre, Status, Year};
pub use catalog::Catalog;
pub use confirm::DeleteConfirmation;
pub use draft::BookDraft;
pub use error::{Error, Field, FieldError};
pub use form::{BookForm, FormMode, Submission};
pub use intent::Intent;
pub use notification::{Notification, NotificationSlot, Severity, NOTIFICATION_TTL_MS};
pub use snapshot::Snapshot;
pub use state::{Effect, Mutation, MutationKind, Shelf};
pub use view::{derive, total_pages, Filter, PageView, PAGE_SIZE};

/// Identifier of a book; opaque to the engine.
pub type BookId = String;
