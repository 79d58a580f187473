use async_trait::async_trait;
use futures::future::join_all;

use patternkit_core::EntityId;

use crate::criteria::Criteria;
use crate::error::RepositoryResult;
use crate::query::{Page, QueryParams};

/// Async persistence contract, independent of storage technology.
///
/// ## Batch semantics
///
/// `create_many`, `update_many` and `delete_many` run one independent
/// operation per item, concurrently. Every item is attempted. Results come
/// back in input order; if any item fails, the first failure (in input order)
/// is returned and the items that succeeded stay applied; nothing is rolled
/// back or retried.
///
/// Inputs are expected to be validated already. Repositories do not
/// validate DTOs.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send + Sync;
    /// Data required to create an entity (identity and timestamps excluded).
    type Create: Send;
    /// Partial update applied to an existing entity.
    type Update: Send;

    async fn find_all(&self, params: QueryParams) -> RepositoryResult<Page<Self::Entity>>;

    async fn find_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Self::Entity>>;

    /// First entity (in storage order) matching every criterion.
    async fn find_one(
        &self,
        criteria: &Criteria<Self::Entity>,
    ) -> RepositoryResult<Option<Self::Entity>>;

    async fn create(&self, data: Self::Create) -> RepositoryResult<Self::Entity>;

    /// Fails with [`RepositoryError::NotFound`](crate::RepositoryError::NotFound)
    /// when `id` does not exist.
    async fn update(&self, id: &EntityId, data: Self::Update) -> RepositoryResult<Self::Entity>;

    /// Returns whether an entity existed.
    async fn delete(&self, id: &EntityId) -> RepositoryResult<bool>;

    async fn exists(&self, id: &EntityId) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Number of entities matching `criteria` (all entities when `None`).
    ///
    /// The default walks every page of `find_all`; implementations with a
    /// cheaper count should override it.
    async fn count(&self, criteria: Option<&Criteria<Self::Entity>>) -> RepositoryResult<u64> {
        let mut page = self.find_all(QueryParams::default()).await?;
        let Some(criteria) = criteria else {
            return Ok(page.pagination.total);
        };

        let mut matched = 0u64;
        loop {
            matched += page.data.iter().filter(|e| criteria.matches(e)).count() as u64;
            if !page.pagination.has_next() {
                return Ok(matched);
            }
            let next = QueryParams::new(page.pagination.page + 1, page.pagination.page_size);
            page = self.find_all(next).await?;
        }
    }

    async fn create_many(&self, items: Vec<Self::Create>) -> RepositoryResult<Vec<Self::Entity>> {
        tracing::debug!(items = items.len(), "create_many");
        join_all(items.into_iter().map(|item| self.create(item)))
            .await
            .into_iter()
            .collect()
    }

    async fn update_many(
        &self,
        updates: Vec<(EntityId, Self::Update)>,
    ) -> RepositoryResult<Vec<Self::Entity>> {
        tracing::debug!(items = updates.len(), "update_many");
        let (ids, patches): (Vec<EntityId>, Vec<Self::Update>) = updates.into_iter().unzip();
        let pending = ids
            .iter()
            .zip(patches)
            .map(|(id, data)| self.update(id, data));
        join_all(pending).await.into_iter().collect()
    }

    async fn delete_many(&self, ids: Vec<EntityId>) -> RepositoryResult<Vec<bool>> {
        tracing::debug!(items = ids.len(), "delete_many");
        join_all(ids.iter().map(|id| self.delete(id)))
            .await
            .into_iter()
            .collect()
    }
}
