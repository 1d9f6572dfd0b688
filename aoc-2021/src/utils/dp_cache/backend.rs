//! Storage backends for the DP cache

use std::collections::HashMap;
use std::hash::Hash;

use super::DpCacheError;

/// Storage for computed values
///
/// `get` returns `Ok(None)` for an index that has not been computed yet.
/// Backends with a fixed index range reject anything outside it.
pub trait Backend<I, K> {
    fn get(&self, index: &I) -> Result<Option<&K>, DpCacheError>;

    fn insert(&mut self, index: I, value: K) -> Result<(), DpCacheError>;

    /// Number of stored values
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dense `usize` indices starting at zero; grows to fit the largest index
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Result<Option<&K>, DpCacheError> {
        Ok(self.data.get(*index).and_then(Option::as_ref))
    }

    fn insert(&mut self, index: usize, value: K) -> Result<(), DpCacheError> {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index] = Some(value);
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Fixed-size backend for indices in `0..N`
#[derive(Debug)]
pub struct ArrayBackend<K, const N: usize> {
    data: [Option<K>; N],
}

impl<K, const N: usize> ArrayBackend<K, N> {
    pub fn new() -> Self {
        Self {
            data: std::array::from_fn(|_| None),
        }
    }

    fn check(index: usize) -> Result<usize, DpCacheError> {
        if index < N {
            Ok(index)
        } else {
            Err(DpCacheError::IndexOutOfBounds { index, len: N })
        }
    }
}

impl<K, const N: usize> Default for ArrayBackend<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, const N: usize> Backend<usize, K> for ArrayBackend<K, N> {
    fn get(&self, index: &usize) -> Result<Option<&K>, DpCacheError> {
        Ok(self.data[Self::check(*index)?].as_ref())
    }

    fn insert(&mut self, index: usize, value: K) -> Result<(), DpCacheError> {
        self.data[Self::check(index)?] = Some(value);
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Sparse or non-integer indices
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Result<Option<&K>, DpCacheError> {
        Ok(self.data.get(index))
    }

    fn insert(&mut self, index: I, value: K) -> Result<(), DpCacheError> {
        self.data.insert(index, value);
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
