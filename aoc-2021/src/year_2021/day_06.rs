use std::thread;
use std::time::Instant;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::{debug, trace};

use crate::utils::dp_cache::{DpCache, DpCacheError, DpProblem, VecBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 6, tags = ["2021", "dynamic-programming"])]
pub struct Solver;

const MAX_TIMER: u8 = 8;
const RESET_TIMER: u8 = 6;
const CYCLE: usize = RESET_TIMER as usize + 1;
const NEWBORN_CYCLE: usize = MAX_TIMER as usize + 1;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_timers(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_timers(input: &str) -> anyhow::Result<Vec<u8>> {
    let line = input.trim();
    if line.is_empty() {
        bail!("no lanternfish timers");
    }
    line.split(',')
        .map(|t| {
            let timer: u8 = t
                .trim()
                .parse()
                .map_err(|e| anyhow!("(line 1) timer {:?}: {}", t, e))?;
            if timer > MAX_TIMER {
                bail!("(line 1) timer {} exceeds {}", timer, MAX_TIMER);
            }
            Ok(timer)
        })
        .collect()
}

/// Population after `days` by tracking how many fish share each timer value
pub fn simulate(timers: &[u8], days: usize) -> u64 {
    let mut buckets = [0u64; MAX_TIMER as usize + 1];
    for &t in timers {
        buckets[t as usize] += 1;
    }
    for _ in 0..days {
        buckets.rotate_left(1);
        buckets[RESET_TIMER as usize] += buckets[MAX_TIMER as usize];
    }
    buckets.iter().sum()
}

/// Fish (itself included) descending from one fish whose timer is 0 with
/// the given number of days left.
///
/// On the first day it spawns; afterwards it behaves like a fish that is
/// `CYCLE` days younger in the schedule and its child like one `NEWBORN_CYCLE`
/// days younger.
struct Lanternfish;

impl DpProblem<usize, u64> for Lanternfish {
    fn deps(&self, days: &usize) -> Vec<usize> {
        [CYCLE, NEWBORN_CYCLE]
            .into_iter()
            .filter_map(|offset| days.checked_sub(offset))
            .collect()
    }

    fn compute(&self, days: &usize, deps: Vec<u64>) -> u64 {
        if *days == 0 {
            return 1;
        }
        // a missing dependency means that fish never spawns again
        let parent = if *days >= CYCLE { deps[0] } else { 1 };
        let child = if *days >= NEWBORN_CYCLE { deps[1] } else { 1 };
        parent + child
    }
}

/// Population after `days`, with one worker per reset-cycle timer value.
///
/// Worker `t` owns its own memo table and answers every starting timer `u`
/// with `u % CYCLE == t`, so timers 7 and 8 ride along with 0 and 1.
pub fn count_with_workers(timers: &[u8], days: usize) -> Result<u64, SolveError> {
    let mut per_timer = [0u64; MAX_TIMER as usize + 1];

    thread::scope(|scope| -> Result<(), SolveError> {
        let handles: Vec<_> = (0..CYCLE)
            .map(|worker| {
                scope.spawn(move || -> Result<Vec<(usize, u64)>, SolveError> {
                    let started = Instant::now();
                    let cache: DpCache<usize, u64, _, _> = DpCache::builder()
                        .backend(VecBackend::with_capacity(days + 1))
                        .problem(Lanternfish)
                        .build();

                    let counts = (worker..=MAX_TIMER as usize)
                        .step_by(CYCLE)
                        .map(|timer| -> Result<(usize, u64), DpCacheError> {
                            let count = match days.checked_sub(timer) {
                                Some(remaining) => cache.get(&remaining)?,
                                None => 1,
                            };
                            Ok((timer, count))
                        })
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|e| SolveError::SolveFailed(Box::new(e)))?;

                    debug!(
                        worker,
                        entries = cache.computed(),
                        elapsed_us = started.elapsed().as_micros() as u64,
                        "lanternfish worker finished"
                    );
                    Ok(counts)
                })
            })
            .collect();

        for handle in handles {
            let counts = handle
                .join()
                .map_err(|_| SolveError::failed("lanternfish worker panicked"))??;
            for (timer, count) in counts {
                trace!(timer, count, "descendants per fish");
                per_timer[timer] = count;
            }
        }
        Ok(())
    })?;

    Ok(timers.iter().map(|&t| per_timer[t as usize]).sum())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate(shared, 80).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_with_workers(shared, 256)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const SAMPLE: &str = "3,4,3,1,2\n";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "5934");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "26984457539");
    }

    #[test]
    fn test_sample_after_eighteen_days() {
        let timers = parse_timers(SAMPLE).unwrap();
        assert_eq!(simulate(&timers, 18), 26);
        assert_eq!(count_with_workers(&timers, 18).unwrap(), 26);
    }

    #[test]
    fn test_high_timers_are_covered() {
        assert_eq!(count_with_workers(&[7, 8], 9).unwrap(), simulate(&[7, 8], 9));
        assert_eq!(count_with_workers(&[8], 0).unwrap(), 1);
    }

    #[test]
    fn test_invalid_timers_are_rejected() {
        assert!(Solver::parse("3,9").is_err());
        assert!(Solver::parse("3,,4").is_err());
        assert!(Solver::parse("  ").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_workers_match_simulation(
            timers in prop::collection::vec(0u8..=8, 1..20),
            days in 0usize..150,
        ) {
            prop_assert_eq!(count_with_workers(&timers, days).unwrap(), simulate(&timers, days));
        }
    }
}
