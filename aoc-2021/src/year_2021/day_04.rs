use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 4, tags = ["2021", "simulation"])]
pub struct Solver;

const SIDE: usize = 5;

type Board = [u32; SIDE * SIDE];

/// Unmarked sum times the last draw, wide enough for any `u32` board
type Score = u128;

#[derive(Debug)]
pub struct SharedData {
    draws: Vec<u32>,
    boards: Vec<Board>,
    common_result: Option<WinningScores>,
}

/// Scores in the order boards completed
#[derive(Debug)]
pub struct WinningScores {
    first: Option<Score>,
    last: Option<Score>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_game(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_game(input: &str) -> anyhow::Result<SharedData> {
    let mut lines = input.lines().map(str::trim).enumerate();

    let (draw_idx, draw_line) = lines
        .find(|(_, line)| !line.is_empty())
        .ok_or_else(|| anyhow!("missing draw numbers"))?;
    let draws = draw_line
        .split(',')
        .map(|n| {
            n.trim()
                .parse::<u32>()
                .map_err(|e| anyhow!("(line {}) draw {:?}: {}", draw_idx + 1, n, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut boards = Vec::new();
    let mut current = Vec::with_capacity(SIDE * SIDE);
    let mut board_start = 0;

    for (line_idx, line) in lines {
        if line.is_empty() {
            if !current.is_empty() {
                boards.push(finish_board(&mut current, board_start)?);
            }
            continue;
        }
        if current.is_empty() {
            board_start = line_idx + 1;
        }
        let row = line
            .split_whitespace()
            .map(|n| n.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))?;
        if row.len() != SIDE {
            bail!("(line {}) expected {} numbers, found {}", line_idx + 1, SIDE, row.len());
        }
        current.extend(row);
    }
    if !current.is_empty() {
        boards.push(finish_board(&mut current, board_start)?);
    }

    if boards.is_empty() {
        bail!("no boards after the draw numbers");
    }

    Ok(SharedData {
        draws,
        boards,
        common_result: None,
    })
}

fn finish_board(cells: &mut Vec<u32>, start_line: usize) -> anyhow::Result<Board> {
    let board: Board = cells
        .as_slice()
        .try_into()
        .map_err(|_| anyhow!("(line {}) board does not have {} rows", start_line, SIDE))?;
    cells.clear();
    Ok(board)
}

fn has_bingo(marked: &[bool; SIDE * SIDE]) -> bool {
    (0..SIDE).any(|r| (0..SIDE).all(|c| marked[r * SIDE + c]))
        || (0..SIDE).any(|c| (0..SIDE).all(|r| marked[r * SIDE + c]))
}

fn play(shared: &mut SharedData) -> &WinningScores {
    shared.common_result.get_or_insert_with(|| {
        let mut marked = vec![[false; SIDE * SIDE]; shared.boards.len()];
        let mut won = vec![false; shared.boards.len()];
        let mut scores = WinningScores {
            first: None,
            last: None,
        };

        for &draw in &shared.draws {
            for (idx, board) in shared.boards.iter().enumerate() {
                if won[idx] {
                    continue;
                }
                for (cell, mark) in board.iter().zip(marked[idx].iter_mut()) {
                    if *cell == draw {
                        *mark = true;
                    }
                }
                if has_bingo(&marked[idx]) {
                    won[idx] = true;
                    let unmarked: Score = board
                        .iter()
                        .zip(&marked[idx])
                        .filter(|(_, m)| !**m)
                        .map(|(&v, _)| Score::from(v))
                        .sum();
                    let score = unmarked * Score::from(draw);
                    debug!(board = idx, draw, score, "board won");
                    scores.first.get_or_insert(score);
                    scores.last = Some(score);
                }
            }
        }
        scores
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        play(shared)
            .first
            .map(|score| score.to_string())
            .ok_or_else(|| SolveError::failed("no board ever wins"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        play(shared)
            .last
            .map(|score| score.to_string())
            .ok_or_else(|| SolveError::failed("no board ever wins"))
    }
}
