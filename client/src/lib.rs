//! # Shelf Client
//!
//! Async shell around [`shelf_engine`]: configuration, access to the remote
//! record store and the [`Session`] event loop that keeps the local catalog
//! in step with it.
//!
//! The collection is never patched locally. After every successful write
//! the session re-fetches the whole collection and replaces its copy.

pub mod config;
pub mod error;
pub mod gateway;
pub mod session;

pub use config::{Config, ConfigError};
pub use error::NetworkError;
pub use gateway::http::HttpGateway;
pub use gateway::memory::{Call, MemoryGateway};
pub use gateway::RecordStore;
pub use session::{Event, Session};
