//! In-memory record store for testing.
//!
//! Records every call it receives, including failed ones. Reads and writes
//! can be made to fail independently, and an optional latency is applied
//! to each call with `tokio::time::sleep`, so paused-time tests control it.

use super::RecordStore;
use crate::error::{NetworkError, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use shelf_engine::{Book, BookId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const MEMORY_URL: &str = "memory:///books";

/// A call received by [`MemoryGateway`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchAll,
    Create(BookId),
    Update(BookId),
    Remove(BookId),
}

/// A [`RecordStore`] backed by a vector of books.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    books: Mutex<Vec<Book>>,
    calls: Mutex<Vec<Call>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    latency: Option<Duration>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `books` already stored.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make `fetch_all` fail with 503 until switched off.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail with 503 until switched off.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn books(&self) -> Vec<Book> {
        lock(&self.books).clone()
    }

    async fn receive(&self, call: Call) {
        lock(&self.calls).push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn check_writable(&self, method: Method) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable(method, MEMORY_URL.to_string()));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unavailable(method: Method, url: String) -> NetworkError {
    NetworkError::Status {
        method,
        url,
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn record_url(id: &str) -> String {
    format!("{}/{}", MEMORY_URL, id)
}

#[async_trait]
impl RecordStore for MemoryGateway {
    async fn fetch_all(&self) -> Result<Vec<Book>> {
        self.receive(Call::FetchAll).await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable(Method::GET, MEMORY_URL.to_string()));
        }
        Ok(self.books())
    }

    async fn create(&self, book: &Book) -> Result<()> {
        self.receive(Call::Create(book.id.clone())).await;
        self.check_writable(Method::POST)?;

        let mut books = lock(&self.books);
        if books.iter().any(|b| b.id == book.id) {
            return Err(NetworkError::Status {
                method: Method::POST,
                url: MEMORY_URL.to_string(),
                status: StatusCode::CONFLICT,
            });
        }
        books.push(book.clone());
        Ok(())
    }

    async fn update(&self, id: &str, book: &Book) -> Result<()> {
        self.receive(Call::Update(id.to_string())).await;
        self.check_writable(Method::PUT)?;

        let mut books = lock(&self.books);
        match books.iter_mut().find(|b| b.id == id) {
            Some(slot) => {
                *slot = book.clone();
                Ok(())
            }
            None => Err(NetworkError::Status {
                method: Method::PUT,
                url: record_url(id),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.receive(Call::Remove(id.to_string())).await;
        self.check_writable(Method::DELETE)?;

        let mut books = lock(&self.books);
        let before = books.len();
        books.retain(|b| b.id != id);
        if books.len() == before {
            return Err(NetworkError::Status {
                method: Method::DELETE,
                url: record_url(id),
                status: StatusCode::NOT_FOUND,
            });
        }
        Ok(())
    }
}
