//! Leaf specifications: rules evaluated directly against a candidate.
//!
//! Leaves never fail. Anything that cannot be decided (an unrecognized
//! operator, values without an ordering) evaluates to `false`.

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use crate::field::Field;

type Test<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type Probe<T> = Arc<dyn Fn(&T) -> Option<Ordering> + Send + Sync>;
type RangeProbe<T> = Arc<dyn Fn(&T) -> (Option<Ordering>, Option<Ordering>) + Send + Sync>;

/// Comparison operator of a [`ComparisonSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// A token that did not name a known operator. Never satisfied.
    Unrecognized(String),
}

impl ComparisonOperator {
    /// Parse an operator token (`eq`, `ne`, `gt`, `gte`, `lt`, `lte`).
    pub fn parse(token: &str) -> Self {
        match token {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Unrecognized(token) => token,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    fn symbol(&self) -> &str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Unrecognized(token) => token,
        }
    }
}

impl From<&str> for ComparisonOperator {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Whether both range ends are included or both excluded.
///
/// One flag drives both ends; half-open ranges need two comparisons
/// combined with `and`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RangeBounds {
    #[default]
    Inclusive,
    Exclusive,
}

/// A predicate over one field's value.
pub struct PropertySpec<T> {
    label: String,
    test: Test<T>,
}

impl<T: 'static> PropertySpec<T> {
    pub fn new<V, P>(field: &Field<T, V>, predicate: P) -> Self
    where
        V: 'static,
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        let label = format!("{} matches predicate", field.name());
        let field = field.clone();
        Self {
            label,
            test: Arc::new(move |candidate: &T| predicate(field.get(candidate))),
        }
    }

    /// A predicate over the whole candidate.
    pub fn from_fn<P>(label: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            test: Arc::new(predicate),
        }
    }
}

impl<T> PropertySpec<T> {
    pub fn evaluate(&self, candidate: &T) -> bool {
        (self.test)(candidate)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A field compared against a literal.
pub struct ComparisonSpec<T> {
    field: String,
    operator: ComparisonOperator,
    literal: String,
    equal: Test<T>,
    order: Probe<T>,
}

impl<T: 'static> ComparisonSpec<T> {
    pub fn new<V>(field: &Field<T, V>, operator: impl Into<ComparisonOperator>, value: V) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        let literal = format!("{value:?}");
        let value = Arc::new(value);

        let (f, v) = (field.clone(), Arc::clone(&value));
        let equal: Test<T> = Arc::new(move |candidate: &T| f.get(candidate) == &*v);
        let (f, v) = (field.clone(), value);
        let order: Probe<T> = Arc::new(move |candidate: &T| f.get(candidate).partial_cmp(&*v));

        Self {
            field: field.name().to_string(),
            operator: operator.into(),
            literal,
            equal,
            order,
        }
    }

    /// Equality-only comparison (`eq` when `negate` is false, `ne` otherwise)
    /// for values that have no ordering.
    pub fn equality<V>(field: &Field<T, V>, value: V, negate: bool) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        let literal = format!("{value:?}");
        let f = field.clone();
        Self {
            field: field.name().to_string(),
            operator: if negate {
                ComparisonOperator::Ne
            } else {
                ComparisonOperator::Eq
            },
            literal,
            equal: Arc::new(move |candidate: &T| f.get(candidate) == &value),
            order: Arc::new(|_: &T| -> Option<Ordering> { None }),
        }
    }
}

impl<T> ComparisonSpec<T> {
    pub fn evaluate(&self, candidate: &T) -> bool {
        match &self.operator {
            ComparisonOperator::Eq => (self.equal)(candidate),
            ComparisonOperator::Ne => !(self.equal)(candidate),
            ComparisonOperator::Gt => (self.order)(candidate) == Some(Ordering::Greater),
            ComparisonOperator::Gte => matches!(
                (self.order)(candidate),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            ComparisonOperator::Lt => (self.order)(candidate) == Some(Ordering::Less),
            ComparisonOperator::Lte => matches!(
                (self.order)(candidate),
                Some(Ordering::Less | Ordering::Equal)
            ),
            ComparisonOperator::Unrecognized(_) => false,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> &ComparisonOperator {
        &self.operator
    }
}

/// A field within `[min, max]` (or `(min, max)`).
pub struct RangeSpec<T> {
    field: String,
    bounds: RangeBounds,
    min: String,
    max: String,
    probe: RangeProbe<T>,
}

impl<T: 'static> RangeSpec<T> {
    pub fn new<V>(field: &Field<T, V>, min: V, max: V, bounds: RangeBounds) -> Self
    where
        V: PartialOrd + fmt::Debug + Send + Sync + 'static,
    {
        let (min_label, max_label) = (format!("{min:?}"), format!("{max:?}"));
        let f = field.clone();
        Self {
            field: field.name().to_string(),
            bounds,
            min: min_label,
            max: max_label,
            probe: Arc::new(move |candidate: &T| {
                let value = f.get(candidate);
                (value.partial_cmp(&min), value.partial_cmp(&max))
            }),
        }
    }
}

impl<T> RangeSpec<T> {
    pub fn evaluate(&self, candidate: &T) -> bool {
        let (against_min, against_max) = (self.probe)(candidate);
        match self.bounds {
            RangeBounds::Inclusive => {
                matches!(against_min, Some(Ordering::Greater | Ordering::Equal))
                    && matches!(against_max, Some(Ordering::Less | Ordering::Equal))
            }
            RangeBounds::Exclusive => {
                against_min == Some(Ordering::Greater) && against_max == Some(Ordering::Less)
            }
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn bounds(&self) -> RangeBounds {
        self.bounds
    }
}

/// A field whose value is a member of a fixed set.
pub struct InSpec<T> {
    field: String,
    members: String,
    test: Test<T>,
}

impl<T: 'static> InSpec<T> {
    pub fn new<V, I>(field: &Field<T, V>, values: I) -> Self
    where
        V: PartialEq + fmt::Debug + Send + Sync + 'static,
        I: IntoIterator<Item = V>,
    {
        let values: Vec<V> = values.into_iter().collect();
        let members = format!("{values:?}");
        let f = field.clone();
        Self {
            field: field.name().to_string(),
            members,
            test: Arc::new(move |candidate: &T| values.contains(f.get(candidate))),
        }
    }
}

impl<T> InSpec<T> {
    pub fn evaluate(&self, candidate: &T) -> bool {
        (self.test)(candidate)
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

macro_rules! impl_leaf_clone {
    ($t:ident => $($f:ident),*) => {
        impl<T> Clone for $t<T> {
            fn clone(&self) -> Self {
                Self { $($f: self.$f.clone()),* }
            }
        }
    };
}

impl_leaf_clone!(PropertySpec => label, test);
impl_leaf_clone!(ComparisonSpec => field, operator, literal, equal, order);
impl_leaf_clone!(RangeSpec => field, bounds, min, max, probe);
impl_leaf_clone!(InSpec => field, members, test);

impl<T> fmt::Display for PropertySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl<T> fmt::Display for ComparisonSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.literal)
    }
}

impl<T> fmt::Display for RangeSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.bounds {
            RangeBounds::Inclusive => ('[', ']'),
            RangeBounds::Exclusive => ('(', ')'),
        };
        let (field, min, max) = (&self.field, &self.min, &self.max);
        write!(f, "{field} in {open}{min}, {max}{close}")
    }
}

impl<T> fmt::Display for InSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.field, self.members)
    }
}
