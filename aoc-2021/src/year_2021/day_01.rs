use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 1, tags = ["2021", "sequence"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                line.trim()
                    .parse::<u32>()
                    .map_err(|e| anyhow!("(line {}) {}: {:?}", line_idx + 1, e, line))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// Number of windows whose last element exceeds the first.
///
/// Comparing sums of adjacent 3-windows reduces to comparing the two
/// elements that differ between them, hence a 4-wide window for part 2.
fn count_increases(depths: &[u32], window: usize) -> usize {
    depths
        .windows(window)
        .filter(|w| w[window - 1] > w[0])
        .count()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_increases(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_increases(shared, 4).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const SAMPLE: &str = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "7");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "5");
    }

    #[test]
    fn test_short_input_has_no_increases() {
        let mut shared = Solver::parse("5").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "0");
    }

    #[test]
    fn test_bad_line_is_reported() {
        let err = Solver::parse("1\n2\nthree\n4").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(ref msg) if msg.contains("line 3")));
    }

    proptest! {
        #[test]
        fn prop_window_shortcut_matches_sums(depths in prop::collection::vec(0u32..10_000, 0..60)) {
            let sums: Vec<u32> = depths.windows(3).map(|w| w.iter().sum()).collect();
            let expected = sums.windows(2).filter(|w| w[1] > w[0]).count();
            prop_assert_eq!(count_increases(&depths, 4), expected);
        }
    }
}
