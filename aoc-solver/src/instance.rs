//! Parsed puzzles behind an object-safe handle

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Run `f` between two UTC timestamps
fn stamped<T, E>(
    f: impl FnOnce() -> Result<T, E>,
) -> Result<(T, DateTime<Utc>, DateTime<Utc>), E> {
    let start = Utc::now();
    let value = f()?;
    Ok((value, start, Utc::now()))
}

#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// One puzzle's input, parsed once and shared by all of its parts
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parsed_at: (DateTime<Utc>, DateTime<Utc>),
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, start, end) = stamped(|| S::parse(input))?;
        Ok(Self {
            year,
            day,
            shared,
            parsed_at: (start, end),
        })
    }

    pub fn shared(&self) -> &S::SharedData<'a> {
        &self.shared
    }
}

/// What the registry hands out: a puzzle whose concrete [`Solver`] is erased
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     println!("{}/{:02} parsed in {}", solver.year(), solver.day(), solver.parse_duration());
///     for part in 1..=solver.parts() {
///         println!("  part {}: {}", part, solver.solve(part)?.answer);
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Parts outside `1..=parts()` give [`SolveError::PartOutOfRange`]
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let shared = &mut self.shared;
        let (answer, solve_start, solve_end) =
            stamped(|| S::solve_part_checked_range(shared, part))?;
        Ok(SolveResult {
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parsed_at.0
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parsed_at.1
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AocParser;

    /// Sums its input on part 1 and counts calls on part 2
    struct Tally;

    impl AocParser for Tally {
        type SharedData<'a> = (Vec<u32>, u32);

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| {
                    n.parse::<u32>()
                        .map_err(|_| ParseError::InvalidFormat(n.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|numbers| (numbers, 0))
        }
    }

    impl Solver for Tally {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            shared.1 += 1;
            match part {
                1 => Ok(shared.0.iter().sum::<u32>().to_string()),
                _ => Ok(shared.1.to_string()),
            }
        }
    }

    #[test]
    fn test_state_is_shared_between_parts() {
        let mut instance = SolverInstance::<Tally>::new(2021, 3, "1 2 3").unwrap();
        assert_eq!(instance.solve(1).unwrap().answer, "6");
        assert_eq!(instance.solve(2).unwrap().answer, "2");
        assert_eq!(instance.shared().1, 2);
        assert_eq!((instance.year(), instance.day(), instance.parts()), (2021, 3, 2));
    }

    #[test]
    fn test_timestamps_are_ordered() {
        let mut instance = SolverInstance::<Tally>::new(2021, 3, "4").unwrap();
        assert!(instance.parse_duration() >= TimeDelta::zero());
        let result = instance.solve(1).unwrap();
        assert!(result.duration() >= TimeDelta::zero());
    }

    #[test]
    fn test_out_of_range_part_is_not_run() {
        let mut instance = SolverInstance::<Tally>::new(2021, 3, "").unwrap();
        assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
        assert_eq!(instance.shared().1, 0);
    }

    #[test]
    fn test_parse_error_is_returned() {
        assert!(matches!(
            SolverInstance::<Tally>::new(2021, 3, "1 x"),
            Err(ParseError::InvalidFormat(ref token)) if token == "x"
        ));
    }
}
