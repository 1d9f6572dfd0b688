//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputSource;
use aoc_solver::{SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

/// Outcome of one part of one puzzle
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    /// Time spent parsing the input this answer was computed from
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// A puzzle to run and the parts requested from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Everything a worker needs, shared by reference across the pool
struct RunSettings {
    registry: SolverRegistry,
    inputs: InputSource,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

pub struct Executor {
    settings: RunSettings,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            settings: RunSettings {
                registry,
                inputs: InputSource::new(config.input_dir.clone(), config.input_file.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Registered solvers that pass the year/day/part filters, in
    /// (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let settings = &self.settings;
        settings
            .registry
            .storage()
            .iter_info()
            .filter(|info| settings.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| settings.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: requested_parts(settings.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Run every work item, streaming one result per requested part into `tx`
    ///
    /// Failing puzzles produce error results; only a closed channel or a
    /// similar runner fault makes this return `Err`.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let settings = &self.settings;
        info!(
            solvers = work_items.len(),
            threads = self.thread_pool.current_num_threads(),
            mode = ?settings.parallelize_by,
            "starting run"
        );

        let groups: Vec<Vec<WorkItem>> = match settings.parallelize_by {
            ParallelizeBy::Sequential => vec![work_items],
            ParallelizeBy::Year => work_items
                .into_iter()
                .chunk_by(|w| w.year)
                .into_iter()
                .map(|(_, group)| group.collect())
                .collect(),
            ParallelizeBy::Day | ParallelizeBy::Part => {
                work_items.into_iter().map(|w| vec![w]).collect()
            }
        };

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in &items {
                        if let Err(e) = run_work_item(work, &tx, settings) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce(|| None, |a, b| match (a, b) {
                    (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                    (a, b) => a.or(b),
                })
                .map_or(Ok(()), Err)
        })
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn requested_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    settings: &RunSettings,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match settings.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error = ArcExecutorError::from(ExecutorError::Input { year, day, source });
            warn!(year, day, %error, "skipping puzzle");
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if settings.parallelize_by == ParallelizeBy::Part {
        work.parts
            .clone()
            .into_par_iter()
            .map(|part| solve_parts(&settings.registry, year, day, &input, part..=part, tx))
            .reduce(|| Ok(()), |a, b| a.and(b))
    } else {
        solve_parts(&settings.registry, year, day, &input, work.parts.clone(), tx)
    }
}

/// Parse once, then solve `parts` in order on the current thread
fn solve_parts(
    registry: &SolverRegistry,
    year: u16,
    day: u8,
    input: &str,
    parts: RangeInclusive<u8>,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            let error = ArcExecutorError::from(ExecutorError::Solver(e));
            warn!(year, day, %error, "parse failed");
            for part in parts {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    let parse_duration = solver.parse_duration();
    debug!(year, day, parse_us = parse_duration.num_microseconds(), "input parsed");

    for part in parts {
        let result = match solver.solve(part) {
            Ok(solved) => SolverResult {
                year,
                day,
                part,
                solve_duration: solved.duration(),
                answer: Ok(solved.answer),
                parse_duration: Some(parse_duration),
            },
            Err(e) => {
                let error = ArcExecutorError::from(ExecutorError::Solver(SolverError::from(e)));
                warn!(year, day, part, %error, "solve failed");
                SolverResult {
                    parse_duration: Some(parse_duration),
                    ..SolverResult::failed(year, day, part, error)
                }
            }
        };
        send(tx, result)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::RegistryBuilder;
    use clap::Parser;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let dir = dir.path().to_string_lossy().into_owned();
        let mut argv = vec!["aoc", "--input-dir", dir.as_str(), "--threads", "2"];
        argv.extend_from_slice(extra);
        let config = Config::from_args(Args::parse_from(argv));
        let registry = RegistryBuilder::new()
            .register_solver_plugins(|plugin| plugin.year == 2021)
            .unwrap()
            .build();
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    fn inputs() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2021")).unwrap();
        fs::write(temp.path().join("2021/day07.txt"), "16,1,2,0,4,2,7,1,2,14").unwrap();
        fs::create_dir_all(temp.path().join("day1")).unwrap();
        fs::write(
            temp.path().join("day1/input.txt"),
            "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n",
        )
        .unwrap();
        temp
    }

    fn answers(results: &[SolverResult]) -> Vec<(u8, u8, String)> {
        results
            .iter()
            .map(|r| {
                let answer = r.answer.as_ref().map_or_else(|_| "error".to_string(), Clone::clone);
                (r.day, r.part, answer)
            })
            .collect()
    }

    #[test]
    fn test_requested_parts() {
        assert_eq!(requested_parts(None, 2), 1..=2);
        assert_eq!(requested_parts(Some(2), 2), 2..=2);
        assert!(requested_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_work_items_follow_filters() {
        let temp = inputs();
        let all = executor(&temp, &[]).collect_work_items();
        assert_eq!(all.len(), 13);
        assert!(all.iter().all(|w| w.parts == (1..=2)));

        let one = executor(&temp, &["-d", "7", "-p", "2"]).collect_work_items();
        assert_eq!(
            one,
            vec![WorkItem {
                year: 2021,
                day: 7,
                parts: 2..=2
            }]
        );
    }

    #[test]
    fn test_every_mode_gives_same_answers() {
        let temp = inputs();
        for mode in ["sequential", "year", "day", "part"] {
            let executor = executor(&temp, &["-d", "7", "--parallelize-by", mode]);
            let results = run(&executor);
            assert_eq!(
                answers(&results),
                vec![(7, 1, "37".to_string()), (7, 2, "168".to_string())],
                "mode {}",
                mode
            );
            assert!(results.iter().all(|r| r.parse_duration.is_some()));
        }
    }

    #[test]
    fn test_missing_input_fails_only_that_puzzle() {
        let temp = inputs();
        let results = run(&executor(&temp, &["-p", "1"]));
        assert_eq!(results.len(), 13);
        let solved: Vec<_> = answers(&results)
            .into_iter()
            .filter(|(_, _, answer)| answer != "error")
            .collect();
        assert_eq!(solved, vec![(1, 1, "7".to_string()), (7, 1, "37".to_string())]);

        let missing = results.iter().find(|r| r.day == 3).unwrap();
        assert!(matches!(
            missing.answer.as_ref().map_err(|e| e.inner()),
            Err(ExecutorError::Input { day: 3, .. })
        ));
    }

    #[test]
    fn test_parse_failure_is_reported_per_part() {
        let temp = inputs();
        fs::write(temp.path().join("2021/day07.txt"), "1,x").unwrap();
        let results = run(&executor(&temp, &["-d", "7"]));
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(matches!(
                result.answer.as_ref().map_err(|e| e.inner()),
                Err(ExecutorError::Solver(SolverError::ParseError(_)))
            ));
        }
    }
}
