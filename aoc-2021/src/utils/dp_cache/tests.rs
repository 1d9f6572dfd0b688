use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

/// Collatz chain length down to 1
struct Collatz;

impl DpProblem<u64, u32> for Collatz {
    fn deps(&self, n: &u64) -> Vec<u64> {
        match *n {
            0 | 1 => vec![],
            n if n % 2 == 0 => vec![n / 2],
            n => vec![3 * n + 1],
        }
    }

    fn compute(&self, _n: &u64, deps: Vec<u32>) -> u32 {
        deps.first().map_or(0, |d| d + 1)
    }
}

fn fib_iterative(n: usize) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

#[test]
fn test_fibonacci_chain() {
    let cache: DpCache<usize, u64, _, _> = DpCache::builder()
        .backend(VecBackend::new())
        .problem(Fibonacci)
        .build();

    assert_eq!(cache.get(&0).unwrap(), 0);
    assert_eq!(cache.get(&1).unwrap(), 1);
    assert_eq!(cache.get(&10).unwrap(), 55);
    assert_eq!(cache.get(&50).unwrap(), 12_586_269_025);
    assert_eq!(cache.computed(), 51);
}

#[test]
fn test_diamond_computes_shared_dependency_once() {
    struct Diamond {
        count: Rc<Cell<u32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let count = Rc::new(Cell::new(0));
    let cache: DpCache<usize, i32, _, _> = DpCache::builder()
        .backend(VecBackend::new())
        .problem(Diamond {
            count: count.clone(),
        })
        .build();

    assert_eq!(cache.get(&0).unwrap(), 50);
    assert_eq!(count.get(), 4);

    assert_eq!(cache.get(&0).unwrap(), 50);
    assert_eq!(count.get(), 4);
}

#[test]
fn test_hashmap_backend_with_tuple_keys() {
    // lattice paths to (r, c)
    let paths = ClosureProblem::new(
        |&(r, c): &(u8, u8)| match (r, c) {
            (0, _) | (_, 0) => vec![],
            _ => vec![(r - 1, c), (r, c - 1)],
        },
        |_: &(u8, u8), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
    );

    let cache = DpCache::builder()
        .backend(HashMapBackend::new())
        .problem(paths)
        .build();

    assert_eq!(cache.get(&(4, 4)).unwrap(), 70);
    assert_eq!(cache.get(&(16, 16)).unwrap(), 601_080_390);
}

#[test]
fn test_collatz_known_values() {
    let cache: DpCache<u64, u32, _, _> = DpCache::builder()
        .backend(HashMapBackend::new())
        .problem(Collatz)
        .build();

    assert_eq!(cache.get(&1).unwrap(), 0);
    assert_eq!(cache.get(&8).unwrap(), 3);
    assert_eq!(cache.get(&27).unwrap(), 111);
}

#[test]
fn test_array_backend_rejects_out_of_range_index() {
    let cache: DpCache<usize, u64, _, _> = DpCache::builder()
        .backend(ArrayBackend::<u64, 10>::new())
        .problem(Fibonacci)
        .build();

    assert_eq!(cache.get(&9).unwrap(), 34);
    assert_eq!(
        cache.get(&10),
        Err(DpCacheError::IndexOutOfBounds { index: 10, len: 10 })
    );
}

#[test]
fn test_cycle_is_reported() {
    let ring = ClosureProblem::new(
        |n: &usize| vec![(n + 1) % 3],
        |_: &usize, deps: Vec<u32>| deps[0] + 1,
    );
    let cache = DpCache::builder()
        .backend(VecBackend::new())
        .problem(ring)
        .build();

    assert_eq!(cache.get(&0), Err(DpCacheError::Cycle("0".to_string())));
    assert_eq!(cache.computed(), 0);
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let selfish = ClosureProblem::new(|n: &usize| vec![*n], |_: &usize, _: Vec<u8>| 0u8);
    let cache = DpCache::builder()
        .backend(VecBackend::new())
        .problem(selfish)
        .build();

    assert!(matches!(cache.get(&7), Err(DpCacheError::Cycle(_))));
}

#[test]
fn test_backend_insert_and_get() {
    let mut backend: VecBackend<i32> = VecBackend::new();
    assert_eq!(backend.get(&5), Ok(None));
    backend.insert(5, 42).unwrap();
    assert_eq!(backend.get(&5), Ok(Some(&42)));
    assert_eq!(backend.get(&2), Ok(None));
    assert_eq!(backend.len(), 1);

    let mut fixed: ArrayBackend<i32, 4> = ArrayBackend::new();
    assert!(fixed.is_empty());
    assert_eq!(
        fixed.insert(4, 1),
        Err(DpCacheError::IndexOutOfBounds { index: 4, len: 4 })
    );
}

proptest! {
    #[test]
    fn prop_fibonacci_matches_iterative(n in 0usize..90) {
        let cache: DpCache<usize, u64, _, _> = DpCache::builder()
            .backend(VecBackend::new())
            .problem(Fibonacci)
            .build();
        prop_assert_eq!(cache.get(&n).unwrap(), fib_iterative(n));
    }

    #[test]
    fn prop_backends_agree(n in 0usize..64) {
        let vec_cache: DpCache<usize, u64, _, _> = DpCache::builder()
            .backend(VecBackend::new())
            .problem(Fibonacci)
            .build();
        let array_cache: DpCache<usize, u64, _, _> = DpCache::builder()
            .backend(ArrayBackend::<u64, 64>::new())
            .problem(Fibonacci)
            .build();
        prop_assert_eq!(vec_cache.get(&n).unwrap(), array_cache.get(&n).unwrap());
    }
}
