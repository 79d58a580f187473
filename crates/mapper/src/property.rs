//! Rule-based field-by-field mapping.

use std::borrow::Cow;

use crate::mapper::Mapper;

type Assign<S, D> = Box<dyn Fn(&S, &mut D) + Send + Sync>;

struct FieldRule<S, D> {
    target: Cow<'static, str>,
    assign: Assign<S, D>,
}

/// Builds each destination from a fresh value and a list of field rules.
///
/// Rules run in registration order. When two rules write the same
/// destination field, the later one wins.
pub struct PropertyMapper<S, D> {
    create: Box<dyn Fn() -> D + Send + Sync>,
    rules: Vec<FieldRule<S, D>>,
}

impl<S: 'static, D: 'static> PropertyMapper<S, D> {
    pub fn new<F>(create_destination: F) -> Self
    where
        F: Fn() -> D + Send + Sync + 'static,
    {
        Self {
            create: Box::new(create_destination),
            rules: Vec::new(),
        }
    }

    /// Copy a value read from the source into the destination.
    pub fn map_field<V, R, W>(
        mut self,
        target: impl Into<Cow<'static, str>>,
        read: R,
        write: W,
    ) -> Self
    where
        R: Fn(&S) -> V + Send + Sync + 'static,
        W: Fn(&mut D, V) + Send + Sync + 'static,
    {
        self.rules.push(FieldRule {
            target: target.into(),
            assign: Box::new(move |source: &S, destination: &mut D| {
                write(destination, read(source))
            }),
        });
        self
    }

    /// Like [`map_field`](Self::map_field), passing the value through
    /// `transform` first.
    pub fn map_field_with<V, U, R, T, W>(
        self,
        target: impl Into<Cow<'static, str>>,
        read: R,
        transform: T,
        write: W,
    ) -> Self
    where
        R: Fn(&S) -> V + Send + Sync + 'static,
        T: Fn(V) -> U + Send + Sync + 'static,
        W: Fn(&mut D, U) + Send + Sync + 'static,
    {
        self.map_field(target, move |source: &S| transform(read(source)), write)
    }
}

impl<S, D> PropertyMapper<S, D> {
    /// Destination field names, in rule order.
    pub fn rules(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|rule| rule.target.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<S, D> Mapper<S, D> for PropertyMapper<S, D> {
    fn map(&self, source: &S) -> D {
        let mut destination = (self.create)();
        for rule in &self.rules {
            (rule.assign)(source, &mut destination);
        }
        tracing::trace!(rules = self.rules.len(), "property mapping applied");
        destination
    }
}
