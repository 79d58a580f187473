use core::marker::PhantomData;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;

use patternkit_core::{EntityId, Patch, Record};
use patternkit_specification::Specification;

use crate::config::{IdStrategy, RepositoryConfig};
use crate::criteria::Criteria;
use crate::error::{RepositoryError, RepositoryResult};
use crate::query::{Page, PageInfo, QueryParams};
use crate::repository::Repository;

#[derive(Debug)]
struct State<D> {
    records: IndexMap<EntityId, Record<D>>,
    next_id: u64,
}

impl<D> State<D> {
    fn empty() -> Self {
        Self {
            records: IndexMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory repository keyed by [`EntityId`], preserving insertion order.
///
/// Intended for tests/dev. Every operation completes without suspending.
/// `D` is the create DTO (stored as [`Record::data`]), `P` the update patch.
#[derive(Debug)]
pub struct InMemoryRepository<D, P> {
    name: String,
    config: RepositoryConfig,
    state: RwLock<State<D>>,
    _patch: PhantomData<fn(P)>,
}

impl<D, P> InMemoryRepository<D, P> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, RepositoryConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: RepositoryConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: RwLock::new(State::empty()),
            _patch: PhantomData,
        }
    }

    /// Repository configured from `PATTERNKIT_*` environment variables.
    pub fn from_env(name: impl Into<String>) -> Self {
        Self::with_config(name, RepositoryConfig::from_env())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn read(&self) -> RepositoryResult<std::sync::RwLockReadGuard<'_, State<D>>> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<std::sync::RwLockWriteGuard<'_, State<D>>> {
        self.state
            .write()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }

    pub fn len(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> RepositoryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove every record and restart the sequential id counter at 1.
    pub fn clear(&self) -> RepositoryResult<()> {
        let mut state = self.write()?;
        *state = State::empty();
        tracing::debug!(repository = %self.name, "cleared");
        Ok(())
    }

    /// Insert records under their own ids, replacing existing ones.
    pub fn seed(&self, records: impl IntoIterator<Item = Record<D>>) -> RepositoryResult<()> {
        let mut state = self.write()?;
        for record in records {
            state.records.insert(record.id.clone(), record);
        }
        tracing::debug!(repository = %self.name, total = state.records.len(), "seeded");
        Ok(())
    }

    fn next_id(&self, state: &mut State<D>) -> EntityId {
        match self.config.id_strategy {
            IdStrategy::Uuid => EntityId::new_v7(),
            IdStrategy::Sequential => loop {
                let id = EntityId::sequential(state.next_id);
                state.next_id += 1;
                // Seeded records may already occupy a sequential id.
                if !state.records.contains_key(&id) {
                    break id;
                }
            },
        }
    }
}

impl<D: Clone, P> InMemoryRepository<D, P> {
    /// Records satisfying `spec`, in insertion order.
    pub async fn find_matching(
        &self,
        spec: &Specification<Record<D>>,
    ) -> RepositoryResult<Vec<Record<D>>> {
        let state = self.read()?;
        Ok(state
            .records
            .values()
            .filter(|r| spec.is_satisfied_by(r))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<D, P> Repository for InMemoryRepository<D, P>
where
    D: Clone + Send + Sync + 'static,
    P: Patch<D> + Send + 'static,
{
    type Entity = Record<D>;
    type Create = D;
    type Update = P;

    async fn find_all(&self, params: QueryParams) -> RepositoryResult<Page<Record<D>>> {
        let params = params.normalized(self.config.default_page_size, self.config.max_page_size);
        let state = self.read()?;
        let total = state.records.len() as u64;

        let data = state
            .records
            .values()
            .skip(params.offset())
            .take(params.page_size as usize)
            .cloned()
            .collect();

        Ok(Page {
            data,
            pagination: PageInfo::new(params, total),
        })
    }

    async fn find_by_id(&self, id: &EntityId) -> RepositoryResult<Option<Record<D>>> {
        Ok(self.read()?.records.get(id).cloned())
    }

    async fn find_one(
        &self,
        criteria: &Criteria<Record<D>>,
    ) -> RepositoryResult<Option<Record<D>>> {
        let state = self.read()?;
        let found = state.records.values().find(|r| criteria.matches(r));
        Ok(found.cloned())
    }

    async fn create(&self, data: D) -> RepositoryResult<Record<D>> {
        let mut state = self.write()?;
        let id = self.next_id(&mut state);
        let record = Record::new(id.clone(), data, Utc::now());
        state.records.insert(id.clone(), record.clone());

        tracing::debug!(repository = %self.name, %id, "entity created");
        Ok(record)
    }

    async fn update(&self, id: &EntityId, data: P) -> RepositoryResult<Record<D>> {
        let mut state = self.write()?;
        let record = state
            .records
            .get_mut(id)
            .ok_or_else(|| RepositoryError::not_found(id))?;
        record.apply(data, Utc::now());

        tracing::debug!(repository = %self.name, %id, "entity updated");
        Ok(record.clone())
    }

    async fn delete(&self, id: &EntityId) -> RepositoryResult<bool> {
        let removed = self.write()?.records.shift_remove(id).is_some();
        tracing::debug!(repository = %self.name, %id, removed, "entity deleted");
        Ok(removed)
    }

    async fn exists(&self, id: &EntityId) -> RepositoryResult<bool> {
        Ok(self.read()?.records.contains_key(id))
    }

    async fn count(&self, criteria: Option<&Criteria<Record<D>>>) -> RepositoryResult<u64> {
        let state = self.read()?;
        let count = match criteria {
            Some(criteria) => {
                let records = state.records.values();
                records.filter(|r| criteria.matches(r)).count()
            }
            None => state.records.len(),
        };
        Ok(count as u64)
    }
}
