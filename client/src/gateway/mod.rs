//! Remote record store access.
//!
//! [`RecordStore`] is the seam between the session and the network. The
//! HTTP implementation talks to a REST collection endpoint; the in-memory
//! one backs tests.

pub mod http;
pub mod memory;

use crate::error::Result;
use async_trait::async_trait;
use shelf_engine::{Book, Mutation};

/// List/create/update/delete against a collection of books.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the whole collection in store order.
    async fn fetch_all(&self) -> Result<Vec<Book>>;

    /// Create `book`; its identifier is chosen by the caller.
    async fn create(&self, book: &Book) -> Result<()>;

    /// Replace the record `id` with `book`.
    async fn update(&self, id: &str, book: &Book) -> Result<()>;

    /// Delete the record `id`.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Perform the write a mutation describes.
    async fn write(&self, mutation: &Mutation) -> Result<()> {
        match mutation {
            Mutation::Create(book) => self.create(book).await,
            Mutation::Update(book) => self.update(&book.id, book).await,
            Mutation::Remove(book) => self.remove(&book.id).await,
        }
    }
}
