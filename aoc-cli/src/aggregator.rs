//! Re-orders results arriving from parallel workers
//!
//! Results are released as soon as every key before them has been seen, so
//! output streams in (year, day, part) order without waiting for the run to
//! finish.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, BTreeSet};

/// Ordering key for results, ascending by year, day, then part
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    /// Keys not yet released
    expected: BTreeSet<ResultKey>,
    /// Results received ahead of their turn
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Buffer `result` and return every result that is now next in line
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&next) = self.expected.first() {
            let Some(result) = self.pending.remove(&next) else {
                break;
            };
            self.expected.pop_first();
            ready.push(result);
        }
        ready
    }

    /// Everything still buffered, in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        for key in self.pending.keys() {
            self.expected.remove(key);
        }
        std::mem::take(&mut self.pending).into_values().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
