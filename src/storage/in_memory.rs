//! In-memory implementation of EntityRepository for testing and development

use crate::core::entity::{Entity, EntityRef};
use crate::core::query::{FindCriteria, SortOrder};
use crate::core::repository::EntityRepository;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory entity repository
///
/// Keeps entities in insertion order. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entities: Arc<RwLock<Vec<EntityRef>>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given entities
    pub fn with_entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = EntityRef>,
    {
        Self {
            entities: Arc::new(RwLock::new(entities.into_iter().collect())),
        }
    }

    /// Store an entity and return its shared handle
    pub fn insert(&self, entity: impl Entity) -> Result<EntityRef> {
        let entity: EntityRef = Arc::new(entity);
        self.insert_ref(entity.clone())?;
        Ok(entity)
    }

    /// Store an already shared entity
    pub fn insert_ref(&self, entity: EntityRef) -> Result<()> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        entities.push(entity);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entities.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EntityRepository for InMemoryRepository {
    async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<EntityRef>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities
            .iter()
            .find(|entity| {
                entity
                    .field_value(field)
                    .is_some_and(|v| v.matches_route_value(value))
            })
            .cloned())
    }

    async fn find_by(
        &self,
        criteria: &FindCriteria,
        order: Option<&SortOrder>,
        limit: Option<usize>,
    ) -> Result<Vec<EntityRef>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut found: Vec<EntityRef> = entities
            .iter()
            .filter(|entity| criteria.matches(entity.as_ref()))
            .cloned()
            .collect();

        if let Some(order) = order {
            found.sort_by(|a, b| order.compare(a.as_ref(), b.as_ref()));
        }
        if let Some(limit) = limit {
            found.truncate(limit);
        }

        Ok(found)
    }
}
