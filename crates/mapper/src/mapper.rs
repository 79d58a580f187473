//! One-way mappers.

use core::marker::PhantomData;
use std::sync::Arc;

/// Pure transformation from `S` to `D`.
///
/// `map` is total: malformed input is the caller's responsibility.
pub trait Mapper<S, D> {
    fn map(&self, source: &S) -> D;

    fn map_all(&self, sources: &[S]) -> Vec<D> {
        sources.iter().map(|s| self.map(s)).collect()
    }

    /// Absent input stays absent; the transform is not invoked.
    fn map_nullable(&self, source: Option<&S>) -> Option<D> {
        source.map(|s| self.map(s))
    }

    /// Absent input maps to an empty list.
    fn map_all_nullable(&self, sources: Option<&[S]>) -> Vec<D> {
        sources.map(|s| self.map_all(s)).unwrap_or_default()
    }

    /// Chain `next` after this mapper.
    fn then<M>(self, next: M) -> CompositeMapper<Self, M, D>
    where
        Self: Sized,
    {
        CompositeMapper::new(self, next)
    }
}

impl<S, D, M> Mapper<S, D> for Arc<M>
where
    M: Mapper<S, D> + ?Sized,
{
    fn map(&self, source: &S) -> D {
        (**self).map(source)
    }
}

impl<S, D, M> Mapper<S, D> for &M
where
    M: Mapper<S, D> + ?Sized,
{
    fn map(&self, source: &S) -> D {
        (**self).map(source)
    }
}

/// Mapper backed by a closure.
#[derive(Clone)]
pub struct FnMapper<F>(F);

impl<S, D, F> Mapper<S, D> for FnMapper<F>
where
    F: Fn(&S) -> D,
{
    fn map(&self, source: &S) -> D {
        (self.0)(source)
    }
}

pub fn from_fn<S, D, F>(f: F) -> FnMapper<F>
where
    F: Fn(&S) -> D,
{
    FnMapper(f)
}

/// `second.map(first.map(source))`, through an intermediate shape `I`.
pub struct CompositeMapper<M1, M2, I> {
    first: M1,
    second: M2,
    _intermediate: PhantomData<fn() -> I>,
}

impl<M1, M2, I> CompositeMapper<M1, M2, I> {
    pub fn new(first: M1, second: M2) -> Self {
        Self {
            first,
            second,
            _intermediate: PhantomData,
        }
    }
}

impl<S, I, D, M1, M2> Mapper<S, D> for CompositeMapper<M1, M2, I>
where
    M1: Mapper<S, I>,
    M2: Mapper<I, D>,
{
    fn map(&self, source: &S) -> D {
        let intermediate = self.first.map(source);
        self.second.map(&intermediate)
    }
}

impl<M1: Clone, M2: Clone, I> Clone for CompositeMapper<M1, M2, I> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}
