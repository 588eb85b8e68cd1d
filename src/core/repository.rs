//! Repository trait the route resolver queries for entities

use crate::core::entity::EntityRef;
use crate::core::query::{FindCriteria, SortOrder};
use anyhow::Result;
use async_trait::async_trait;

/// Lookup capability for one entity class
///
/// Implementations wrap whatever persistence layer owns the entities.
/// The resolver only reads through this trait and never caches results.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Find the first entity whose `field` renders to `value`
    async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<EntityRef>>;

    /// Find entities matching `criteria`, optionally ordered and limited
    ///
    /// `limit = None` means unbounded.
    async fn find_by(
        &self,
        criteria: &FindCriteria,
        order: Option<&SortOrder>,
        limit: Option<usize>,
    ) -> Result<Vec<EntityRef>>;

    /// Find every entity, optionally limited
    async fn find_all(&self, limit: Option<usize>) -> Result<Vec<EntityRef>> {
        self.find_by(&FindCriteria::all(), None, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::field::FieldValue;
    use std::sync::Arc;
    use uuid::Uuid;

    #[derive(Debug)]
    struct Page {
        permalink: String,
    }

    impl Entity for Page {
        fn entity_class(&self) -> &str {
            "page"
        }

        fn id(&self) -> Uuid {
            Uuid::nil()
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            (field == "permalink").then(|| FieldValue::from(self.permalink.as_str()))
        }
    }

    struct FixedRepository(Vec<EntityRef>);

    #[async_trait]
    impl EntityRepository for FixedRepository {
        async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<EntityRef>> {
            Ok(self
                .0
                .iter()
                .find(|e| e.route_value(field).as_deref() == Some(value))
                .cloned())
        }

        async fn find_by(
            &self,
            criteria: &FindCriteria,
            _order: Option<&SortOrder>,
            limit: Option<usize>,
        ) -> Result<Vec<EntityRef>> {
            Ok(self
                .0
                .iter()
                .filter(|e| criteria.matches(e.as_ref()))
                .take(limit.unwrap_or(usize::MAX))
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn test_find_all_delegates_to_find_by() {
        let repository = FixedRepository(vec![
            Arc::new(Page {
                permalink: "about".to_string(),
            }),
            Arc::new(Page {
                permalink: "contact".to_string(),
            }),
        ]);

        assert_eq!(repository.find_all(None).await.unwrap().len(), 2);
        assert_eq!(repository.find_all(Some(1)).await.unwrap().len(), 1);

        let found = repository.find_one_by("permalink", "contact").await.unwrap();
        assert!(found.is_some());
    }
}
