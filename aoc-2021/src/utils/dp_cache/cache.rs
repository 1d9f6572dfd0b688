//! Single-threaded DP cache

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;
use super::DpCacheError;

/// Lazily evaluated memo table for a [`DpProblem`]
///
/// Values are computed on first request, after their dependencies, and then
/// served from the backend. Interior mutability lets `get` take `&self`, so a
/// cache can be shared by reference inside a single thread; give each thread
/// its own cache.
///
/// # Example
///
/// ```rust
/// use aoc_2021::utils::dp_cache::{ArrayBackend, DpCache, DpProblem};
///
/// struct Factorial;
///
/// impl DpProblem<usize, u64> for Factorial {
///     fn deps(&self, n: &usize) -> Vec<usize> {
///         if *n == 0 { vec![] } else { vec![n - 1] }
///     }
///     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
///         if *n == 0 { 1 } else { *n as u64 * deps[0] }
///     }
/// }
///
/// let cache: DpCache<usize, u64, _, _> = DpCache::builder()
///     .backend(ArrayBackend::<u64, 21>::new())
///     .problem(Factorial)
///     .build();
/// assert_eq!(cache.get(&20).unwrap(), 2_432_902_008_176_640_000);
/// assert!(cache.get(&21).is_err());
/// ```
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    in_progress: RefCell<HashSet<I>>,
    problem: P,
    _phantom: PhantomData<K>,
}

impl DpCache<(), (), (), ()> {
    /// Start building a cache; both `backend` and `problem` are required
    pub fn builder() -> DpCacheBuilder<(), ()> {
        DpCacheBuilder {
            backend: (),
            problem: (),
        }
    }
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone + Eq + Hash + Debug,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            in_progress: RefCell::new(HashSet::new()),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and any missing dependencies first
    ///
    /// # Errors
    ///
    /// * [`DpCacheError::Cycle`] if `index` is reached again while its own
    ///   dependencies are being resolved
    /// * [`DpCacheError::IndexOutOfBounds`] if the backend cannot hold an index
    pub fn get(&self, index: &I) -> Result<K, DpCacheError> {
        if let Some(value) = self.backend.borrow().get(index)? {
            return Ok(value.clone());
        }

        if !self.in_progress.borrow_mut().insert(index.clone()) {
            return Err(DpCacheError::Cycle(format!("{:?}", index)));
        }

        let resolved = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect::<Result<Vec<K>, _>>();
        self.in_progress.borrow_mut().remove(index);

        let value = self.problem.compute(index, resolved?);
        self.backend
            .borrow_mut()
            .insert(index.clone(), value.clone())?;
        Ok(value)
    }

    /// Number of values computed so far
    pub fn computed(&self) -> usize {
        self.backend.borrow().len()
    }
}

/// Builder returned by [`DpCache::builder`]
pub struct DpCacheBuilder<B, P> {
    backend: B,
    problem: P,
}

impl<B, P> DpCacheBuilder<B, P> {
    pub fn backend<B2>(self, backend: B2) -> DpCacheBuilder<B2, P> {
        DpCacheBuilder {
            backend,
            problem: self.problem,
        }
    }

    pub fn problem<P2>(self, problem: P2) -> DpCacheBuilder<B, P2> {
        DpCacheBuilder {
            backend: self.backend,
            problem,
        }
    }

    pub fn build<I, K>(self) -> DpCache<I, K, B, P>
    where
        I: Clone + Eq + Hash + Debug,
        K: Clone,
        B: Backend<I, K>,
        P: DpProblem<I, K>,
    {
        DpCache::new(self.backend, self.problem)
    }
}
