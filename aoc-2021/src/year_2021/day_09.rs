use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 9, tags = ["2021", "grid"])]
pub struct Solver;

const RIDGE: u8 = 9;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_digits(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn is_low_point(map: &Grid<u8>, x: usize, y: usize) -> bool {
    let height = map.get(x, y);
    map.neighbours(x, y).all(|(nx, ny)| height < map.get(nx, ny))
}

/// Sizes of the regions separated by ridges, found with a flood fill
fn basin_sizes(map: &Grid<u8>) -> Vec<usize> {
    let mut seen = vec![false; map.cells().len()];
    let mut sizes = Vec::new();
    let mut stack = Vec::new();

    for start in 0..map.cells().len() {
        if seen[start] || map.cells()[start] == RIDGE {
            continue;
        }
        seen[start] = true;
        stack.push(start);
        let mut size = 0;

        while let Some(index) = stack.pop() {
            size += 1;
            let (x, y) = map.position_of(index);
            for (nx, ny) in map.neighbours(x, y) {
                let next = map.index_of(nx, ny);
                if !seen[next] && map.cells()[next] != RIDGE {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        sizes.push(size);
    }
    sizes
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut risk = 0u64;
        for y in 0..shared.height() {
            for x in 0..shared.width() {
                if is_low_point(shared, x, y) {
                    risk += shared.get(x, y).map_or(0, |&h| h as u64 + 1);
                }
            }
        }
        Ok(risk.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sizes = basin_sizes(shared);
        debug!(basins = sizes.len(), "flood fill complete");
        if sizes.len() < 3 {
            return Err(SolveError::failed(format!(
                "need three basins, found {}",
                sizes.len()
            )));
        }
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        Ok(sizes.iter().take(3).product::<usize>().to_string())
    }
}
