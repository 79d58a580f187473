//! The specification tree and its evaluation.

use core::fmt;
use std::sync::Arc;

use crate::field::Field;
use crate::leaf::{ComparisonOperator, ComparisonSpec, InSpec, PropertySpec, RangeBounds, RangeSpec};

/// A composable business rule over candidates of type `T`.
///
/// A specification is an immutable expression tree: leaves decide directly
/// from the candidate, composites combine child specifications. Composition
/// (`and`, `or`, `not`) always builds a new tree and leaves its operands
/// untouched; children are shared, so clones are cheap.
///
/// Composites evaluate their children left to right with short-circuiting:
/// `a.and(b)` never runs `b` when `a` is false, `a.or(b)` never runs `b` when
/// `a` is true.
pub enum Specification<T> {
    Property(PropertySpec<T>),
    Comparison(ComparisonSpec<T>),
    Range(RangeSpec<T>),
    In(InSpec<T>),
    And(Arc<Specification<T>>, Arc<Specification<T>>),
    Or(Arc<Specification<T>>, Arc<Specification<T>>),
    Not(Arc<Specification<T>>),
}

impl<T: 'static> Specification<T> {
    /// Leaf: `predicate` applied to the value of `field`.
    pub fn property<V, P>(field: &Field<T, V>, predicate: P) -> Self
    where
        V: 'static,
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self::Property(PropertySpec::new(field, predicate))
    }

    /// Leaf: `predicate` applied to the whole candidate.
    pub fn from_fn<P>(label: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Property(PropertySpec::from_fn(label, predicate))
    }

    /// Leaf: `field <operator> value`.
    pub fn comparison<V>(
        field: &Field<T, V>,
        operator: impl Into<ComparisonOperator>,
        value: V,
    ) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        Self::Comparison(ComparisonSpec::new(field, operator, value))
    }

    /// Leaf: `field == value`, for values with equality only.
    pub fn equals<V>(field: &Field<T, V>, value: V) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        Self::Comparison(ComparisonSpec::equality(field, value, false))
    }

    /// Leaf: `field != value`, for values with equality only.
    pub fn not_equals<V>(field: &Field<T, V>, value: V) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        Self::Comparison(ComparisonSpec::equality(field, value, true))
    }

    /// Leaf: `min <= field <= max` (or strict on both ends for
    /// [`RangeBounds::Exclusive`]).
    pub fn range<V>(field: &Field<T, V>, min: V, max: V, bounds: RangeBounds) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        Self::Range(RangeSpec::new(field, min, max, bounds))
    }

    /// Leaf: `field` is one of `values`.
    pub fn one_of<V, I>(field: &Field<T, V>, values: I) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
        I: IntoIterator<Item = V>,
    {
        Self::In(InSpec::new(field, values))
    }
}

impl<T> Specification<T> {
    pub fn is_satisfied_by(&self, candidate: &T) -> bool {
        match self {
            Self::Property(leaf) => leaf.evaluate(candidate),
            Self::Comparison(leaf) => leaf.evaluate(candidate),
            Self::Range(leaf) => leaf.evaluate(candidate),
            Self::In(leaf) => leaf.evaluate(candidate),
            Self::And(left, right) => {
                left.is_satisfied_by(candidate) && right.is_satisfied_by(candidate)
            }
            Self::Or(left, right) => {
                left.is_satisfied_by(candidate) || right.is_satisfied_by(candidate)
            }
            Self::Not(inner) => !inner.is_satisfied_by(candidate),
        }
    }

    pub fn and(&self, other: &Specification<T>) -> Specification<T> {
        Self::And(Arc::new(self.clone()), Arc::new(other.clone()))
    }

    pub fn or(&self, other: &Specification<T>) -> Specification<T> {
        Self::Or(Arc::new(self.clone()), Arc::new(other.clone()))
    }

    pub fn not(&self) -> Specification<T> {
        Self::Not(Arc::new(self.clone()))
    }

    /// True iff every candidate satisfies the rule (vacuously true when empty).
    pub fn all_satisfy<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        candidates.into_iter().all(|c| self.is_satisfied_by(c))
    }

    /// True iff at least one candidate satisfies the rule (false when empty).
    pub fn any_satisfy<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        candidates.into_iter().any(|c| self.is_satisfied_by(c))
    }

    /// Matching candidates, in input order.
    pub fn filter<'a, I>(&self, candidates: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        candidates
            .into_iter()
            .filter(|c| self.is_satisfied_by(c))
            .collect()
    }

    /// Owned variant of [`filter`](Self::filter).
    pub fn filter_owned(&self, candidates: Vec<T>) -> Vec<T> {
        candidates
            .into_iter()
            .filter(|c| self.is_satisfied_by(c))
            .collect()
    }

    /// First matching candidate in input order.
    pub fn find_first<'a, I>(&self, candidates: I) -> Option<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        candidates.into_iter().find(|c| self.is_satisfied_by(c))
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::And(..) | Self::Or(..) | Self::Not(_))
    }
}

impl<T> Clone for Specification<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Property(leaf) => Self::Property(leaf.clone()),
            Self::Comparison(leaf) => Self::Comparison(leaf.clone()),
            Self::Range(leaf) => Self::Range(leaf.clone()),
            Self::In(leaf) => Self::In(leaf.clone()),
            Self::And(l, r) => Self::And(Arc::clone(l), Arc::clone(r)),
            Self::Or(l, r) => Self::Or(Arc::clone(l), Arc::clone(r)),
            Self::Not(inner) => Self::Not(Arc::clone(inner)),
        }
    }
}

impl<T> fmt::Display for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(leaf) => fmt::Display::fmt(leaf, f),
            Self::Comparison(leaf) => fmt::Display::fmt(leaf, f),
            Self::Range(leaf) => fmt::Display::fmt(leaf, f),
            Self::In(leaf) => fmt::Display::fmt(leaf, f),
            Self::And(l, r) => write!(f, "({l} AND {r})"),
            Self::Or(l, r) => write!(f, "({l} OR {r})"),
            Self::Not(inner) if inner.is_leaf() => write!(f, "NOT ({inner})"),
            Self::Not(inner) => write!(f, "NOT {inner}"),
        }
    }
}

impl<T> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Specification({self})")
    }
}
