//! Fluent construction of conjunctive specifications.

use core::fmt;
use std::sync::Arc;

use crate::error::{SpecificationError, SpecificationResult};
use crate::field::Field;
use crate::leaf::{ComparisonOperator, RangeBounds};
use crate::spec::Specification;

/// Accumulates leaf clauses and folds them into one AND-ed specification.
///
/// Every method consumes the builder and returns it, so a builder is never
/// shared while it is being filled. Clauses are joined left to right: the
/// first clause added is the first one evaluated.
pub struct SpecificationBuilder<T> {
    clauses: Vec<Specification<T>>,
}

impl<T: 'static> SpecificationBuilder<T> {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// `field` satisfies an arbitrary predicate.
    pub fn satisfies<V, P>(self, field: &Field<T, V>, predicate: P) -> Self
    where
        V: 'static,
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.clause(Specification::property(field, predicate))
    }

    pub fn equals<V>(self, field: &Field<T, V>, value: V) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.clause(Specification::equals(field, value))
    }

    pub fn not_equals<V>(self, field: &Field<T, V>, value: V) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        self.clause(Specification::not_equals(field, value))
    }

    pub fn greater_than<V>(self, field: &Field<T, V>, value: V) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        let spec = Specification::comparison(field, ComparisonOperator::Gt, value);
        self.clause(spec)
    }

    pub fn less_than<V>(self, field: &Field<T, V>, value: V) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        let spec = Specification::comparison(field, ComparisonOperator::Lt, value);
        self.clause(spec)
    }

    /// Inclusive range on both ends.
    pub fn between<V>(self, field: &Field<T, V>, min: V, max: V) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        self.between_with(field, min, max, RangeBounds::Inclusive)
    }

    /// Exclusive range on both ends.
    pub fn between_exclusive<V>(self, field: &Field<T, V>, min: V, max: V) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        self.between_with(field, min, max, RangeBounds::Exclusive)
    }

    pub fn between_with<V>(self, field: &Field<T, V>, min: V, max: V, bounds: RangeBounds) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        self.clause(Specification::range(field, min, max, bounds))
    }

    pub fn one_of<V, I>(self, field: &Field<T, V>, values: I) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
        I: IntoIterator<Item = V>,
    {
        self.clause(Specification::one_of(field, values))
    }
}

impl<T> SpecificationBuilder<T> {
    /// Append an already-built specification as the next clause.
    pub fn clause(mut self, spec: Specification<T>) -> Self {
        self.clauses.push(spec);
        self
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Fold all clauses with AND, left to right.
    pub fn build(self) -> SpecificationResult<Specification<T>> {
        let count = self.clauses.len();
        let mut clauses = self.clauses.into_iter();
        let first = clauses.next().ok_or(SpecificationError::Empty)?;

        let spec = clauses.fold(first, |acc, next| {
            Specification::And(Arc::new(acc), Arc::new(next))
        });

        tracing::trace!(clauses = count, spec = %spec, "specification built");
        Ok(spec)
    }
}

impl<T: 'static> Default for SpecificationBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternkit_core::DomainError;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Account {
        age: u32,
        active: bool,
        plan: &'static str,
    }

    fn age() -> Field<Account, u32> {
        Field::new("age", |a: &Account| &a.age)
    }

    fn active() -> Field<Account, bool> {
        Field::new("active", |a: &Account| &a.active)
    }

    fn plan() -> Field<Account, &'static str> {
        Field::new("plan", |a: &Account| &a.plan)
    }

    fn account(age: u32, active: bool) -> Account {
        Account {
            age,
            active,
            plan: "pro",
        }
    }

    #[test]
    fn builder_ands_every_clause() {
        let spec = SpecificationBuilder::new()
            .satisfies(&age(), |v| *v > 18)
            .equals(&active(), true)
            .build()
            .unwrap();

        assert!(spec.is_satisfied_by(&account(20, true)));
        assert!(!spec.is_satisfied_by(&account(20, false)));
        assert!(!spec.is_satisfied_by(&account(16, true)));
    }

    #[test]
    fn build_without_clauses_is_a_configuration_error() {
        let err = SpecificationBuilder::<Account>::new().build().unwrap_err();
        assert_eq!(err, SpecificationError::Empty);
        assert_eq!(err.to_string(), "no specifications defined");

        let domain: DomainError = err.into();
        assert_eq!(domain.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn single_clause_builds_that_clause() {
        let spec = SpecificationBuilder::new()
            .greater_than(&age(), 30)
            .build()
            .unwrap();
        assert!(spec.is_leaf());
        assert_eq!(spec.to_string(), "age > 30");
    }

    #[test]
    fn clauses_are_evaluated_in_insertion_order() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let recording = |tag: &'static str, result: bool| {
            let seen = std::sync::Arc::clone(&seen);
            Specification::from_fn(tag, move |_: &Account| {
                seen.lock().unwrap().push(tag);
                result
            })
        };

        let spec = SpecificationBuilder::new()
            .clause(recording("first", true))
            .clause(recording("second", false))
            .clause(recording("third", true))
            .build()
            .unwrap();

        assert!(!spec.is_satisfied_by(&account(40, true)));
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn every_clause_kind_participates() {
        let builder = SpecificationBuilder::new()
            .not_equals(&plan(), "free")
            .less_than(&age(), 65)
            .between(&age(), 18, 64)
            .one_of(&plan(), ["pro", "team"]);
        assert_eq!(builder.len(), 4);

        let spec = builder.build().unwrap();
        assert!(spec.is_satisfied_by(&account(30, true)));
        assert!(!spec.is_satisfied_by(&account(70, true)));

        let free = Account {
            plan: "free",
            ..account(30, true)
        };
        assert!(!spec.is_satisfied_by(&free));
    }

    #[test]
    fn exclusive_between_rejects_both_ends() {
        let spec = SpecificationBuilder::new()
            .between_exclusive(&age(), 1, 10)
            .build()
            .unwrap();
        assert!(!spec.is_satisfied_by(&account(1, true)));
        assert!(!spec.is_satisfied_by(&account(10, true)));
        assert!(spec.is_satisfied_by(&account(5, true)));
    }
}
