use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 7, tags = ["2021", "optimization"])]
pub struct Solver;

/// Every target up to the farthest crab is tried, so positions are capped
const MAX_POSITION: u64 = 1_000_000;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let line = input.trim();
        if line.is_empty() {
            return Err(ParseError::MissingData("no crab positions".to_string()));
        }
        line.split(',')
            .map(|p| {
                let position = p
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| anyhow!("position {:?}: {}", p, e))?;
                if position > MAX_POSITION {
                    bail!("position {} exceeds {}", position, MAX_POSITION);
                }
                Ok(position)
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("(line 1) {}", e)))
    }
}

fn linear(distance: u64) -> Option<u64> {
    Some(distance)
}

fn triangular(distance: u64) -> Option<u64> {
    distance
        .checked_add(1)
        .and_then(|next| next.checked_mul(distance))
        .map(|doubled| doubled / 2)
}

/// Cheapest alignment over every position between 0 and the farthest crab
fn min_fuel(crabs: &[u64], cost: impl Fn(u64) -> Option<u64>) -> Result<u64, SolveError> {
    let max = *crabs
        .iter()
        .max()
        .ok_or_else(|| SolveError::failed("no crabs"))?;
    (0..=max).try_fold(u64::MAX, |best, target| {
        crabs
            .iter()
            .try_fold(0u64, |total, &c| total.checked_add(cost(c.abs_diff(target))?))
            .map(|fuel| best.min(fuel))
            .ok_or_else(|| SolveError::failed(format!("fuel to reach {} overflows", target)))
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        min_fuel(shared, linear).map(|fuel| fuel.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        min_fuel(shared, triangular).map(|fuel| fuel.to_string())
    }
}
