//! Exact-match criteria for `find_one` / `count`.

use std::sync::Arc;

use patternkit_specification::Field;

type Check<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// An AND of `field == value` checks.
///
/// Criteria only express exact (shallow) equality. Richer filtering goes
/// through a [`Specification`](patternkit_specification::Specification).
/// Empty criteria match every entity.
pub struct Criteria<E> {
    fields: Vec<String>,
    checks: Vec<Check<E>>,
}

impl<E: 'static> Criteria<E> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Require `field` to equal `value`.
    pub fn eq<V>(mut self, field: &Field<E, V>, value: V) -> Self
    where
        V: PartialEq + Send + Sync + 'static,
    {
        let f = field.clone();
        let check: Check<E> = Arc::new(move |entity: &E| f.get(entity) == &value);
        self.fields.push(field.name().to_string());
        self.checks.push(check);
        self
    }
}

impl<E> Criteria<E> {
    pub fn matches(&self, entity: &E) -> bool {
        self.checks.iter().all(|check| check(entity))
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Names of the constrained fields, in insertion order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl<E: 'static> Default for Criteria<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Criteria<E> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            checks: self.checks.clone(),
        }
    }
}

impl<E> core::fmt::Debug for Criteria<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Criteria")
            .field("fields", &self.fields)
            .finish()
    }
}
