use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 10, tags = ["2021", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Round,
    Square,
    Curly,
    Angle,
}

impl Bracket {
    fn corruption_score(self) -> u64 {
        match self {
            Bracket::Round => 3,
            Bracket::Square => 57,
            Bracket::Curly => 1197,
            Bracket::Angle => 25137,
        }
    }

    fn completion_score(self) -> u64 {
        match self {
            Bracket::Round => 1,
            Bracket::Square => 2,
            Bracket::Curly => 3,
            Bracket::Angle => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Open(Bracket),
    Close(Bracket),
}

impl TryFrom<char> for Token {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            '(' => Token::Open(Bracket::Round),
            '[' => Token::Open(Bracket::Square),
            '{' => Token::Open(Bracket::Curly),
            '<' => Token::Open(Bracket::Angle),
            ')' => Token::Close(Bracket::Round),
            ']' => Token::Close(Bracket::Square),
            '}' => Token::Close(Bracket::Curly),
            '>' => Token::Close(Bracket::Angle),
            other => return Err(other),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineStatus {
    /// First closer that does not match
    Corrupted(Bracket),
    /// Chunks still open, innermost last
    Incomplete(Vec<Bracket>),
    Complete,
}

fn check(line: &[Token]) -> LineStatus {
    let mut open = Vec::new();
    for &token in line {
        match token {
            Token::Open(b) => open.push(b),
            Token::Close(b) => {
                if open.pop() != Some(b) {
                    return LineStatus::Corrupted(b);
                }
            }
        }
    }
    if open.is_empty() {
        LineStatus::Complete
    } else {
        LineStatus::Incomplete(open)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<Token>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.trim()
                    .chars()
                    .map(Token::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|c| {
                        ParseError::InvalidFormat(format!(
                            "(line {}) unexpected character {:?}",
                            line_idx + 1,
                            c
                        ))
                    })
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let score: u64 = shared
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| match check(line) {
                LineStatus::Corrupted(found) => {
                    debug!(line = idx + 1, ?found, "corrupted line");
                    Some(found.corruption_score())
                }
                _ => None,
            })
            .sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut scores: Vec<u64> = shared
            .iter()
            .filter_map(|line| match check(line) {
                LineStatus::Incomplete(open) => Some(
                    open.iter()
                        .rev()
                        .fold(0, |total, b| total * 5 + b.completion_score()),
                ),
                _ => None,
            })
            .collect();

        if scores.is_empty() {
            return Err(SolveError::failed("no incomplete lines"));
        }
        scores.sort_unstable();
        Ok(scores[scores.len() / 2].to_string())
    }
}
