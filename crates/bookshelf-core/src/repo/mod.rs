//! Repository contracts and the in-memory implementation
//!
//! Callers (the HTTP handler, the combination service) depend only on
//! `Repository<E>` trait objects and never on a concrete store, so another
//! backing store can be substituted without touching them.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::model::{Author, Book, Entity};

pub use memory::MemoryRepository;

/// Storage capability for one kind of entity
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Return every stored entity, in no particular order
    ///
    /// # Errors
    ///
    /// Returns `FetchFailure` if the backing store cannot be read. The
    /// in-memory store never fails.
    async fn get_all(&self) -> Result<Vec<E>>;

    /// Store a new entity and return it with its assigned id
    ///
    /// Any id already set on `entity` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a blank name and `DuplicateKey` if an
    /// entity with the same name is already stored. The store is unchanged
    /// on error.
    async fn create(&self, entity: E) -> Result<E>;
}

pub type BookRepository = dyn Repository<Book>;
pub type AuthorRepository = dyn Repository<Author>;

/// Construct an empty in-memory book store behind the repository contract
pub fn new_memory_book_repository() -> Arc<BookRepository> {
    Arc::new(MemoryRepository::<Book>::new())
}

/// Construct an empty in-memory author store behind the repository contract
pub fn new_memory_author_repository() -> Arc<AuthorRepository> {
    Arc::new(MemoryRepository::<Author>::new())
}
