use serde::{Deserialize, Serialize};

use super::{AuthorId, Entity, EntityKind};

/// Store-assigned book identifier; `0` means "not yet stored"
pub type BookId = u64;

/// A book and the id of the author who wrote it
///
/// `author_id` is a plain foreign key value. Nothing checks that the
/// referenced author exists; a dangling reference simply never joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Assigned by the store; any id in a request body is discarded
    #[serde(skip_deserializing)]
    pub id: BookId,

    pub name: String,

    /// Cleared when the book is embedded next to its resolved author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<AuthorId>,
}

impl Book {
    /// Create an unsaved book referencing the given author
    pub fn new(name: impl Into<String>, author_id: AuthorId) -> Self {
        Self {
            id: 0,
            name: name.into(),
            author_id: Some(author_id),
        }
    }

    /// Create an unsaved book with no author reference
    pub fn without_author(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            author_id: None,
        }
    }

    /// Check whether this book has been assigned an id by a store
    pub fn is_stored(&self) -> bool {
        self.id != 0
    }
}

impl Entity for Book {
    const KIND: EntityKind = EntityKind::Book;

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }
}
