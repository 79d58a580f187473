//! Named field accessors.

use std::borrow::Cow;
use std::sync::Arc;

/// A named, explicit accessor from a candidate `T` to one of its values `V`.
///
/// The name is only used for descriptions; lookups always go through the
/// accessor function.
pub struct Field<T, V> {
    name: Cow<'static, str>,
    get: Arc<dyn Fn(&T) -> &V + Send + Sync>,
}

impl<T, V> Field<T, V> {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, get: F) -> Self
    where
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            get: Arc::new(get),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the field from `candidate`.
    pub fn get<'a>(&self, candidate: &'a T) -> &'a V {
        (self.get)(candidate)
    }
}

impl<T> Field<T, T> {
    /// A field that yields the candidate itself.
    pub fn identity(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, |candidate: &T| candidate)
    }
}

impl<T, V> Clone for Field<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            get: Arc::clone(&self.get),
        }
    }
}

impl<T, V> core::fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
