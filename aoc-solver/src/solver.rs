//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle text into the data every part works from
pub trait AocParser {
    /// Parsed input, optionally borrowing from it through `'a`
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Answers part `N` from the shared parsed input
///
/// Implement one of these per part and let `#[derive(AocSolver)]` wire them
/// into [`Solver::solve_part`].
pub trait PartSolver<const N: u8>: AocParser {
    /// May leave intermediate results in `shared` for later parts
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A puzzle with a fixed number of parts, addressed by part number
///
/// Usually derived; the derive maps part `k` to `PartSolver<k>`.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Sums;
///
/// impl AocParser for Sums {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Sums {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.iter().sum::<i64>().to_string()),
///             2 => Ok(shared.iter().product::<i64>().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut data = Sums::parse("2\n3\n4").unwrap();
/// assert_eq!(Sums::solve_part(&mut data, 2).unwrap(), "24");
/// ```
pub trait Solver: AocParser {
    const PARTS: u8;

    /// # Errors
    ///
    /// * [`SolveError::PartNotImplemented`] for a part with no implementation
    /// * [`SolveError::SolveFailed`] when the input has no answer
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked solving, available on every [`Solver`]
pub trait SolverExt: Solver {
    /// Rejects `part == 0` and `part > PARTS` before delegating to `solve_part`
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
