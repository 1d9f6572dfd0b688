use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 3, tags = ["2021", "bits"])]
pub struct Solver;

#[derive(Debug)]
pub struct Report {
    width: usize,
    values: Vec<u32>,
}

impl AocParser for Solver {
    type SharedData<'a> = Report;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_report(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_report(input: &str) -> anyhow::Result<Report> {
    let mut width = None;
    let mut values = Vec::new();

    for (line_idx, line) in input.trim().lines().map(str::trim).enumerate() {
        let expected = *width.get_or_insert(line.len());
        if line.is_empty() || line.len() != expected {
            bail!(
                "(line {}) expected {} bits, found {:?}",
                line_idx + 1,
                expected,
                line
            );
        }
        if expected > u32::BITS as usize {
            bail!("(line {}) more than {} bits", line_idx + 1, u32::BITS);
        }
        let value = u32::from_str_radix(line, 2)
            .map_err(|_| anyhow!("(line {}) not a binary number: {:?}", line_idx + 1, line))?;
        values.push(value);
    }

    let width = width.ok_or_else(|| anyhow!("report is empty"))?;
    Ok(Report { width, values })
}

fn ones_at(values: &[u32], bit: usize) -> usize {
    values.iter().filter(|&&v| (v >> bit) & 1 == 1).count()
}

/// Filters column by column from the most significant bit until one value is left
fn rating(report: &Report, keep_most_common: bool) -> Result<u32, SolveError> {
    let mut candidates = report.values.clone();

    for bit in (0..report.width).rev() {
        if candidates.len() <= 1 {
            break;
        }
        let ones = ones_at(&candidates, bit);
        let zeros = candidates.len() - ones;
        let keep = if keep_most_common {
            ones >= zeros
        } else {
            ones < zeros
        };
        candidates.retain(|&v| ((v >> bit) & 1 == 1) == keep);
    }

    candidates
        .first()
        .copied()
        .ok_or_else(|| SolveError::failed("no value left while filtering ratings"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let half = shared.values.len() / 2;
        let gamma = (0..shared.width)
            .filter(|&bit| ones_at(&shared.values, bit) > half)
            .fold(0u64, |acc, bit| acc | (1 << bit));
        let mask = (1u64 << shared.width) - 1;
        let epsilon = !gamma & mask;
        Ok((gamma * epsilon).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let oxygen = rating(shared, true)?;
        let co2 = rating(shared, false)?;
        tracing::debug!(oxygen, co2, "life support ratings");
        Ok((oxygen as u64 * co2 as u64).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
00100
11110
10110
10111
10101
01111
00111
11100
10000
11001
00010
01010
";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "198");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "230");
    }

    #[test]
    fn test_ratings_on_sample() {
        let report = parse_report(SAMPLE).unwrap();
        assert_eq!(rating(&report, true).unwrap(), 23);
        assert_eq!(rating(&report, false).unwrap(), 10);
    }

    #[test]
    fn test_tie_keeps_one_for_oxygen_and_zero_for_co2() {
        let report = parse_report("10\n01").unwrap();
        assert_eq!(rating(&report, true).unwrap(), 0b10);
        assert_eq!(rating(&report, false).unwrap(), 0b01);
    }

    #[test]
    fn test_even_split_is_not_a_majority() {
        // two ones out of four is not more than half
        let mut shared = Solver::parse("1\n1\n0\n0").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
    }

    #[test]
    fn test_ragged_widths_are_rejected() {
        let err = Solver::parse("101\n11\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(ref msg) if msg.contains("line 2")));
        assert!(Solver::parse("102").is_err());
        assert!(Solver::parse("").is_err());
    }
}
