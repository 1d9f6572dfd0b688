use std::collections::HashSet;

use anyhow::{anyhow, bail, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 13, tags = ["2021", "geometry"])]
pub struct Solver;

/// Largest dot coordinate or fold line; bounds the rendered picture
const MAX_COORD: u32 = 4095;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// Fold the right half over to the left
    Left(u32),
    /// Fold the bottom half up
    Up(u32),
}

impl Fold {
    fn apply(self, (x, y): (u32, u32)) -> (u32, u32) {
        match self {
            Fold::Left(line) if x > line => (x.abs_diff(2 * line), y),
            Fold::Up(line) if y > line => (x, y.abs_diff(2 * line)),
            _ => (x, y),
        }
    }
}

#[derive(Debug)]
pub struct Manual {
    dots: Vec<(u32, u32)>,
    folds: Vec<Fold>,
}

impl AocParser for Solver {
    type SharedData<'a> = Manual;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_manual(input).map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

fn parse_coord(text: &str) -> anyhow::Result<u32> {
    let value = text.parse::<u32>()?;
    if value > MAX_COORD {
        bail!("{} exceeds {}", value, MAX_COORD);
    }
    Ok(value)
}

fn parse_manual(input: &str) -> anyhow::Result<Manual> {
    let mut dots = Vec::new();
    let mut folds = Vec::new();

    for (line_idx, line) in input.lines().map(str::trim).enumerate() {
        let at = || format!("line {}", line_idx + 1);
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("fold along ") {
            let (axis, value) = rest
                .split_once('=')
                .ok_or_else(|| anyhow!("({}) expected `axis=value`", at()))?;
            let value = parse_coord(value).with_context(at)?;
            folds.push(match axis {
                "x" => Fold::Left(value),
                "y" => Fold::Up(value),
                other => bail!("({}) unknown fold axis {:?}", at(), other),
            });
        } else {
            if !folds.is_empty() {
                bail!("({}) dot after fold instructions", at());
            }
            let (x, y) = line
                .split_once(',')
                .ok_or_else(|| anyhow!("({}) expected `x,y`, found {:?}", at(), line))?;
            dots.push((
                parse_coord(x).with_context(at)?,
                parse_coord(y).with_context(at)?,
            ));
        }
    }

    if folds.is_empty() {
        bail!("no fold instructions");
    }
    Ok(Manual { dots, folds })
}

fn fold_all(dots: &[(u32, u32)], folds: &[Fold]) -> HashSet<(u32, u32)> {
    dots.iter()
        .map(|&dot| folds.iter().fold(dot, |dot, fold| fold.apply(dot)))
        .collect()
}

/// Rows of `#` and `.` bounded by the last fold along each axis
fn render(dots: &HashSet<(u32, u32)>, folds: &[Fold]) -> String {
    let width = folds
        .iter()
        .rev()
        .find_map(|f| match f {
            Fold::Left(line) => Some(*line),
            _ => None,
        })
        .unwrap_or_else(|| dots.iter().map(|d| d.0 + 1).max().unwrap_or(0));
    let height = folds
        .iter()
        .rev()
        .find_map(|f| match f {
            Fold::Up(line) => Some(*line),
            _ => None,
        })
        .unwrap_or_else(|| dots.iter().map(|d| d.1 + 1).max().unwrap_or(0));

    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| if dots.contains(&(x, y)) { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(fold_all(&shared.dots, &shared.folds[..1]).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let dots = fold_all(&shared.dots, &shared.folds);
        debug!(dots = dots.len(), folds = shared.folds.len(), "sheet folded");
        Ok(render(&dots, &shared.folds))
    }
}
