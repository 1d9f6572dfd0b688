use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::trace;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 8, tags = ["2021", "deduction"])]
pub struct Solver;

/// Lit wires a..g as bits 0..7
type Pattern = u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    patterns: [Pattern; 10],
    outputs: [Pattern; 4],
}

fn parse_pattern(word: &str) -> anyhow::Result<Pattern> {
    if word.is_empty() || word.len() > 7 {
        bail!("pattern {:?} must have 1 to 7 wires", word);
    }
    word.bytes().try_fold(0u8, |acc, b| match b {
        b'a'..=b'g' => Ok(acc | 1 << (b - b'a')),
        _ => Err(anyhow!("unknown wire {:?} in {:?}", b as char, word)),
    })
}

fn parse_patterns<const N: usize>(text: &str) -> anyhow::Result<[Pattern; N]> {
    let patterns = text
        .split_whitespace()
        .map(parse_pattern)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let found = patterns.len();
    patterns
        .try_into()
        .map_err(|_| anyhow!("expected {} patterns, found {}", N, found))
}

fn parse_entry(line: &str) -> anyhow::Result<Entry> {
    let (patterns, outputs) = line
        .split_once('|')
        .ok_or_else(|| anyhow!("missing `|` separator"))?;
    Ok(Entry {
        patterns: parse_patterns(patterns)?,
        outputs: parse_patterns(outputs)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Entry>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_entry(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn wires(pattern: Pattern) -> u32 {
    pattern.count_ones()
}

fn contains(outer: Pattern, inner: Pattern) -> bool {
    outer & inner == inner
}

/// Work out which pattern shows which digit.
///
/// 1, 4, 7 and 8 have unique wire counts. Among the six-wire digits 9 covers
/// 4, 0 covers 1 but not 4, and 6 is the rest. Among the five-wire digits 3
/// covers 1, 5 fits inside 6, and 2 is the rest.
fn deduce(patterns: &[Pattern; 10]) -> Option<[Pattern; 10]> {
    let unique = |count: u32| {
        let mut found = patterns.iter().copied().filter(|&p| wires(p) == count);
        let first = found.next()?;
        found.next().is_none().then_some(first)
    };
    let one = unique(2)?;
    let four = unique(4)?;
    let seven = unique(3)?;
    let eight = unique(7)?;

    let mut digits: [Option<Pattern>; 10] = [None; 10];
    digits[1] = Some(one);
    digits[4] = Some(four);
    digits[7] = Some(seven);
    digits[8] = Some(eight);

    for &p in patterns.iter().filter(|&&p| wires(p) == 6) {
        let digit = if contains(p, four) {
            9
        } else if contains(p, one) {
            0
        } else {
            6
        };
        if digits[digit].replace(p).is_some() {
            return None;
        }
    }

    let six = digits[6]?;
    for &p in patterns.iter().filter(|&&p| wires(p) == 5) {
        let digit = if contains(p, one) {
            3
        } else if contains(six, p) {
            5
        } else {
            2
        };
        if digits[digit].replace(p).is_some() {
            return None;
        }
    }

    let mut resolved = [0; 10];
    for (slot, digit) in resolved.iter_mut().zip(digits) {
        *slot = digit?;
    }
    Some(resolved)
}

fn decode(entry: &Entry) -> Option<u32> {
    let digits = deduce(&entry.patterns)?;
    trace!(?digits, "deduced wiring");
    entry.outputs.iter().try_fold(0, |value, output| {
        let digit = digits.iter().position(|d| d == output)?;
        Some(value * 10 + digit as u32)
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let easy = shared
            .iter()
            .flat_map(|entry| entry.outputs.iter())
            .filter(|&&output| matches!(wires(output), 2 | 3 | 4 | 7))
            .count();
        Ok(easy.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                decode(entry).map(u64::from).ok_or_else(|| {
                    SolveError::failed(format!("entry {} cannot be decoded", idx + 1))
                })
            })
            .sum::<Result<u64, _>>()
            .map(|total| total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe
edbfga begcd cbg gc gcadebf fbgde acbgfd abcde gfcbed gfec | fcgedb cgb dgebacf gc
fgaebd cg bdaec gdafb agbcfd gdcbef bgcad gfac gcb cdgabef | cg cg fdcagb cbg
fbegcd cbd adcefb dageb afcb bc aefdc ecdab fgdeca fcdbega | efabcd cedba gadfec cb
aecbfdg fbg gf bafeg dbefa fcge gcbea fcaegb dgceab fcbdga | gecf egdcabf bgf bfgea
fgeab ca afcebg bdacfeg cfaedg gcfdb baec bfadeg bafgc acf | gebdcfa ecba ca fadegcb
dbcfg fgd bdegcaf fgec aegbdf ecdfab fbedc dacgb gdcebf gf | cefg dcbef fcge gbcadfe
bdfegc cbegaf gecbf dfcage bdacg ed bedf ced adcbefg gebcd | ed bcgafe cdgba cbgef
egadfb cdbfeg cegd fecab cgb gbdefca cg fgcdab egfdb bfceg | gbdfcae bgc cg cgb
gcafb gcf dcaebfg ecagb gf abcdeg gaef cafbge fdbac fegbdc | fgae cfgab fg bagce
";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "26");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "61229");
    }

    #[test]
    fn test_single_entry_decodes() {
        let entry = parse_entry(
            "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf",
        )
        .unwrap();
        assert_eq!(decode(&entry), Some(5353));
    }

    #[test]
    fn test_undecodable_entry_fails() {
        // two patterns with two wires
        let mut shared = Solver::parse("ab cd abc abcd abcdefg abcde abcdf abcef abcdeg abcdfg | ab ab ab ab").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_malformed_entries_are_rejected() {
        assert!(Solver::parse("ab | cd").is_err());
        assert!(Solver::parse("ab cd abc abcd abcdefg abcde abcdf abcef abcdeg abcdfg ab cd ef gh").is_err());
        assert!(Solver::parse("xb cd abc abcd abcdefg abcde abcdf abcef abcdeg abcdfg | ab ab ab ab").is_err());
    }
}
