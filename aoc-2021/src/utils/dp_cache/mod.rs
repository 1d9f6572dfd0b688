//! Memoization cache for dynamic programming over a dependency DAG
//!
//! A [`DpProblem`] says which indices an index depends on and how to combine
//! their values. [`DpCache`] resolves those dependencies lazily, computes each
//! index once and stores the result in a pluggable [`Backend`].
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` indices, grows on demand
//! - [`ArrayBackend`]: fixed-size `usize` indices, no allocation after construction
//! - [`HashMapBackend`]: any `Hash + Eq` index, e.g. tuples
//!
//! # Cycles
//!
//! An index that (transitively) depends on itself is reported as
//! [`DpCacheError::Cycle`] rather than recursing forever.
//!
//! # Example
//!
//! ```rust
//! use aoc_2021::utils::dp_cache::{DpCache, DpProblem, VecBackend};
//!
//! struct Fibonacci;
//!
//! impl DpProblem<usize, u64> for Fibonacci {
//!     fn deps(&self, n: &usize) -> Vec<usize> {
//!         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
//!     }
//!
//!     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
//!         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
//!     }
//! }
//!
//! let cache: DpCache<usize, u64, _, _> = DpCache::builder()
//!     .backend(VecBackend::new())
//!     .problem(Fibonacci)
//!     .build();
//! assert_eq!(cache.get(&10).unwrap(), 55);
//! ```
//!
//! # Example: closures
//!
//! ```rust
//! use aoc_2021::utils::dp_cache::{ClosureProblem, DpCache, HashMapBackend};
//!
//! // ways to climb `n` stairs taking 1 or 2 steps
//! let stairs = ClosureProblem::new(
//!     |n: &u32| if *n <= 1 { vec![] } else { vec![n - 1, n - 2] },
//!     |_: &u32, deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
//! );
//!
//! let cache = DpCache::builder()
//!     .backend(HashMapBackend::new())
//!     .problem(stairs)
//!     .build();
//! assert_eq!(cache.get(&5).unwrap(), 8);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{ArrayBackend, Backend, HashMapBackend, VecBackend};
pub use cache::{DpCache, DpCacheBuilder};
pub use problem::{ClosureProblem, DpProblem};

use thiserror::Error;

/// Errors raised while resolving a cached value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DpCacheError {
    /// The index depends on itself, directly or through other indices
    #[error("dependency cycle detected at index {0}")]
    Cycle(String),

    /// The index does not fit a fixed-size backend
    #[error("index {index} is out of bounds for a backend of size {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

#[cfg(test)]
mod tests;
