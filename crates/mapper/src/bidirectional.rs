//! Two-way mappers.

/// Conversion in both directions between `A` and `B`.
///
/// Implementations should round-trip the fields both shapes share.
pub trait BidirectionalMapper<A, B> {
    fn map_forward(&self, source: &A) -> B;

    fn map_backward(&self, source: &B) -> A;

    fn map_forward_all(&self, sources: &[A]) -> Vec<B> {
        sources.iter().map(|s| self.map_forward(s)).collect()
    }

    fn map_backward_all(&self, sources: &[B]) -> Vec<A> {
        sources.iter().map(|s| self.map_backward(s)).collect()
    }
}
