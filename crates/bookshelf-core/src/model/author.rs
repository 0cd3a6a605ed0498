use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

pub type AuthorId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    /// Assigned by the store; any id in a request body is discarded
    #[serde(skip_deserializing)]
    pub id: AuthorId,

    pub name: String,
}

impl Author {
    /// Create an unsaved author
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl Entity for Author {
    const KIND: EntityKind = EntityKind::Author;

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
