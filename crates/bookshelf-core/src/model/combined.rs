use serde::{Deserialize, Serialize};

use super::{Author, Book};

/// One book joined with its resolved author
///
/// Serializes as `{"id", "name", "author": {"id", "name"}}`. The book's
/// `author_id` is always `None` here so the reference is not repeated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombinedResponse {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
}

impl CombinedResponse {
    /// Pair a book with its author, dropping the redundant reference
    pub fn new(mut book: Book, author: Author) -> Self {
        book.author_id = None;
        Self { book, author }
    }
}
