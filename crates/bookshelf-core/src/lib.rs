//! Bookshelf Core - in-memory book and author stores
//!
//! This crate provides:
//! - Book, Author and CombinedResponse models
//! - The `Repository` contract and its name-keyed in-memory implementation
//! - The combination service joining books to authors (concurrent fetch, then join)
//! - The canonical error facility and structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod repo;
pub mod service;

#[doc(hidden)]
pub use bookshelf_core_types as core_types;

// Re-export commonly used types
pub use errors::{BookshelfError, ExError, ExErrorKind, Result};
pub use model::{Author, AuthorId, Book, BookId, CombinedResponse, Entity, EntityKind};
pub use repo::{
    new_memory_author_repository, new_memory_book_repository, AuthorRepository, BookRepository,
    MemoryRepository, Repository,
};
pub use service::{new_combination_service, CombinationService, CombinationServiceImpl, JoinStrategy};
