use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Repository;
use crate::errors::{BookshelfError, Result};
use crate::model::Entity;
use crate::{log_op_end, log_op_error, log_op_start};

/// In-memory, name-keyed store for one entity kind
///
/// Ids are `number of stored entries + 1` at insert time. That is only
/// collision-free because entries are never removed; a delete operation
/// would need a separate monotonic counter.
///
/// The map is never handed out by reference: `get_all` returns clones and
/// `create` is the only write path.
#[derive(Debug)]
pub struct MemoryRepository<E: Entity> {
    entries: RwLock<HashMap<String, E>>,
}

impl<E: Entity> MemoryRepository<E> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entities
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn insert(&self, entity: E) -> Result<E> {
        entity.validate()?;

        // Duplicate check, id assignment and insert run under one write guard.
        let mut entries = self.entries.write().await;
        let id = entries.len() as u64 + 1;

        match entries.entry(entity.name().to_string()) {
            Entry::Occupied(_) => Err(BookshelfError::DuplicateKey {
                kind: E::KIND,
                name: entity.name().to_string(),
            }),
            Entry::Vacant(slot) => {
                let stored = entity.with_id(id);
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>> {
        let start = Instant::now();
        log_op_start!("repo.get_all", entity_kind = E::KIND.as_str());

        let all: Vec<E> = self.entries.read().await.values().cloned().collect();

        log_op_end!(
            "repo.get_all",
            duration_ms = start.elapsed().as_millis() as u64,
            entity_kind = E::KIND.as_str(),
            count = all.len()
        );
        Ok(all)
    }

    async fn create(&self, entity: E) -> Result<E> {
        let start = Instant::now();
        let name = entity.name().to_string();
        log_op_start!(
            "repo.create",
            entity_kind = E::KIND.as_str(),
            entity_name = name.as_str()
        );

        let result = self.insert(entity).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(stored) => {
                log_op_end!(
                    "repo.create",
                    duration_ms = duration_ms,
                    entity_kind = E::KIND.as_str(),
                    entity_name = name.as_str(),
                    entity_id = stored.id()
                );
            }
            Err(err) => {
                log_op_error!(
                    "repo.create",
                    *err,
                    duration_ms = duration_ms,
                    entity_kind = E::KIND.as_str(),
                    entity_name = name.as_str()
                );
            }
        }

        result
    }
}
