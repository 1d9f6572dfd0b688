//! Problem definitions for the DP cache

use std::marker::PhantomData;

/// Dependency structure and combination rule of a DP problem
///
/// - `I`: index type
/// - `K`: value type stored for each index
pub trait DpProblem<I, K> {
    /// Indices whose values are needed to compute `index`; empty for base cases
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value for `index` given the values of `deps(index)`, in the same order
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Adapts a `deps` closure and a `compute` closure to [`DpProblem`]
pub struct ClosureProblem<I, K, D, C> {
    dep_fn: D,
    compute_fn: C,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, D, C> ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self {
            dep_fn,
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
