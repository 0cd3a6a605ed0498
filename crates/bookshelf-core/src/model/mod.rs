pub mod author;
pub mod book;
pub mod combined;

pub use author::{Author, AuthorId};
pub use book::{Book, BookId};
pub use combined::CombinedResponse;

use crate::errors::{BookshelfError, Result};

/// The kinds of records the service stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    Author,
}

impl EntityKind {
    /// Lowercase name used in log fields and error codes
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Book => "book",
            EntityKind::Author => "author",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Book => f.write_str("Book"),
            EntityKind::Author => f.write_str("Author"),
        }
    }
}

/// A record that can live in a name-keyed repository
///
/// The name is the uniqueness key within one store; the numeric id is
/// assigned by the store on insert and never changes afterwards.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> u64;

    fn name(&self) -> &str;

    /// Return a copy of this record carrying the given id
    fn with_id(self, id: u64) -> Self;

    /// Check required fields before the record is stored
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty or whitespace-only.
    fn validate(&self) -> Result<()> {
        if self.name().trim().is_empty() {
            return Err(BookshelfError::ValidationError {
                kind: Self::KIND,
                field: "name",
            });
        }
        Ok(())
    }
}
