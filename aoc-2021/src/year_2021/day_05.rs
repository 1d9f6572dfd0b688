use anyhow::{anyhow, bail, Context};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 5, tags = ["2021", "geometry"])]
pub struct Solver;

/// Largest coordinate accepted; the dense overlap grid is sized from it
const MAX_COORD: i32 = 4095;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Segment {
    fn is_axis_aligned(&self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }

    fn points(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let dx = (self.x2 - self.x1).signum();
        let dy = (self.y2 - self.y1).signum();
        let steps = (self.x2 - self.x1).abs().max((self.y2 - self.y1).abs());
        let (x1, y1) = (self.x1, self.y1);
        (0..=steps).map(move |i| (x1 + i * dx, y1 + i * dy))
    }
}

fn parse_point(text: &str) -> anyhow::Result<(i32, i32)> {
    let (x, y) = text
        .trim()
        .split_once(',')
        .ok_or_else(|| anyhow!("expected `x,y`, found {:?}", text.trim()))?;
    let x: i32 = x.trim().parse().with_context(|| format!("bad x {:?}", x))?;
    let y: i32 = y.trim().parse().with_context(|| format!("bad y {:?}", y))?;
    if x < 0 || y < 0 {
        bail!("negative coordinate in {:?}", text.trim());
    }
    if x > MAX_COORD || y > MAX_COORD {
        bail!("coordinate in {:?} exceeds {}", text.trim(), MAX_COORD);
    }
    Ok((x, y))
}

fn parse_segment(line: &str) -> anyhow::Result<Segment> {
    let (from, to) = line
        .split_once("->")
        .ok_or_else(|| anyhow!("missing `->`"))?;
    let (x1, y1) = parse_point(from)?;
    let (x2, y2) = parse_point(to)?;
    let segment = Segment { x1, y1, x2, y2 };
    if !segment.is_axis_aligned() && (x2 - x1).abs() != (y2 - y1).abs() {
        bail!("segment {:?} is neither axis aligned nor at 45 degrees", line);
    }
    Ok(segment)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Segment>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_segment(line).map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) {:#}", line_idx + 1, e))
                })
            })
            .collect()
    }
}

/// Number of points covered by at least two of the selected segments
fn count_overlaps<'s>(segments: impl Iterator<Item = &'s Segment> + Clone) -> usize {
    let (width, height) = segments.clone().fold((0, 0), |(w, h), s| {
        (w.max(s.x1.max(s.x2) + 1), h.max(s.y1.max(s.y2) + 1))
    });
    let width = width as usize;
    let mut covered = vec![0u8; width * height as usize];

    for segment in segments {
        for (x, y) in segment.points() {
            let cell = &mut covered[y as usize * width + x as usize];
            *cell = cell.saturating_add(1);
        }
    }
    covered.iter().filter(|&&c| c >= 2).count()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_overlaps(shared.iter().filter(|s| s.is_axis_aligned())).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_overlaps(shared.iter()).to_string())
    }
}
