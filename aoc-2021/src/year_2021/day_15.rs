use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 15, tags = ["2021", "shortest-path"])]
pub struct Solver;

const TILES: usize = 5;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse_digits(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if map.cells().contains(&0) {
            return Err(ParseError::InvalidFormat("risk levels must be 1-9".to_string()));
        }
        Ok(map)
    }
}

/// Repeat the map `tiles` times in each direction, adding the tile's distance
/// from the top-left tile to every risk and wrapping 9 back to 1
fn tile(map: &Grid<u8>, tiles: usize) -> anyhow::Result<Grid<u8>> {
    let (width, height) = (map.width() * tiles, map.height() * tiles);
    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let base = map.cells()[map.index_of(x % map.width(), y % map.height())] as usize;
            let shift = x / map.width() + y / map.height();
            cells.push(((base + shift - 1) % 9 + 1) as u8);
        }
    }
    Grid::from_cells(width, height, cells)
}

/// Cheapest total risk from the top-left to the bottom-right corner. The
/// starting cell is never entered so its risk is not counted.
fn lowest_risk(map: &Grid<u8>) -> Option<u64> {
    let target = map.cells().len().checked_sub(1)?;
    let mut best = vec![u64::MAX; map.cells().len()];
    let mut queue = BinaryHeap::new();
    best[0] = 0;
    queue.push(Reverse((0u64, 0usize)));

    while let Some(Reverse((risk, index))) = queue.pop() {
        if index == target {
            return Some(risk);
        }
        if risk > best[index] {
            continue;
        }
        let (x, y) = map.position_of(index);
        for (nx, ny) in map.neighbours(x, y) {
            let next = map.index_of(nx, ny);
            let total = risk + map.cells()[next] as u64;
            if total < best[next] {
                best[next] = total;
                queue.push(Reverse((total, next)));
            }
        }
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        lowest_risk(shared)
            .map(|risk| risk.to_string())
            .ok_or_else(|| SolveError::failed("exit is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let full = tile(shared, TILES).map_err(|e| SolveError::failed(e.to_string()))?;
        debug!(width = full.width(), height = full.height(), "map tiled");
        lowest_risk(&full)
            .map(|risk| risk.to_string())
            .ok_or_else(|| SolveError::failed("exit is unreachable"))
    }
}
