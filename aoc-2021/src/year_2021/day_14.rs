use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 14, tags = ["2021", "dynamic-programming"])]
pub struct Solver;

const ELEMENTS: usize = 26;

type Counts = [u64; ELEMENTS];

#[derive(Debug)]
pub struct Instructions {
    template: Vec<u8>,
    rules: HashMap<[u8; 2], u8>,
}

impl AocParser for Solver {
    type SharedData<'a> = Instructions;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_instructions(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn element(c: u8) -> Option<u8> {
    c.is_ascii_uppercase().then_some(c)
}

fn parse_instructions(input: &str) -> anyhow::Result<Instructions> {
    let mut lines = input.lines().map(str::trim).enumerate();

    let template = lines
        .by_ref()
        .find(|(_, line)| !line.is_empty())
        .ok_or_else(|| anyhow!("no polymer template"))
        .and_then(|(line_idx, line)| {
            line.bytes()
                .map(element)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| anyhow!("(line {}) template {:?} is not A-Z", line_idx + 1, line))
        })?;

    let mut rules = HashMap::new();
    for (line_idx, line) in lines {
        if line.is_empty() {
            continue;
        }
        let rule = line.split_once(" -> ").and_then(|(pair, insert)| {
            match (pair.as_bytes(), insert.as_bytes()) {
                (&[a, b], &[c]) => Some(([element(a)?, element(b)?], element(c)?)),
                _ => None,
            }
        });
        let Some((pair, insert)) = rule else {
            bail!("(line {}) expected `AB -> C`, found {:?}", line_idx + 1, line);
        };
        if rules.insert(pair, insert).is_some() {
            bail!("(line {}) duplicate rule for {:?}", line_idx + 1, &line[..2]);
        }
    }

    Ok(Instructions { template, rules })
}

/// Elements inserted between one pair after a number of steps, keyed by
/// `(steps, pair)`.
///
/// A pair with a rule `AB -> C` splits into `AC` and `CB` one step later; a
/// pair without a rule never grows.
struct Polymerization<'a> {
    rules: &'a HashMap<[u8; 2], u8>,
}

impl DpProblem<(usize, [u8; 2]), Counts> for Polymerization<'_> {
    fn deps(&self, &(steps, [a, b]): &(usize, [u8; 2])) -> Vec<(usize, [u8; 2])> {
        match (steps, self.rules.get(&[a, b])) {
            (0, _) | (_, None) => vec![],
            (_, Some(&c)) => vec![(steps - 1, [a, c]), (steps - 1, [c, b])],
        }
    }

    fn compute(&self, &(_, pair): &(usize, [u8; 2]), deps: Vec<Counts>) -> Counts {
        let mut counts = [0; ELEMENTS];
        if let [left, right] = deps.as_slice() {
            for (slot, (l, r)) in counts.iter_mut().zip(left.iter().zip(right)) {
                *slot = l + r;
            }
            if let Some(&c) = self.rules.get(&pair) {
                counts[(c - b'A') as usize] += 1;
            }
        }
        counts
    }
}

fn element_spread(instructions: &Instructions, steps: usize) -> Result<u64, SolveError> {
    let cache: DpCache<(usize, [u8; 2]), Counts, _, _> = DpCache::builder()
        .backend(HashMapBackend::new())
        .problem(Polymerization {
            rules: &instructions.rules,
        })
        .build();

    let mut counts: Counts = [0; ELEMENTS];
    for &c in &instructions.template {
        counts[(c - b'A') as usize] += 1;
    }
    for pair in instructions.template.windows(2) {
        let inserted = cache
            .get(&(steps, [pair[0], pair[1]]))
            .map_err(|e| SolveError::SolveFailed(Box::new(e)))?;
        for (slot, n) in counts.iter_mut().zip(inserted) {
            *slot += n;
        }
    }
    debug!(steps, states = cache.computed(), "polymer counted");

    let present = counts.iter().copied().filter(|&n| n > 0);
    let most = present.clone().max().unwrap_or(0);
    let least = present.min().unwrap_or(0);
    Ok(most - least)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(element_spread(shared, 10)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(element_spread(shared, 40)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SAMPLE: &str = "\
NNCB

CH -> B
HH -> N
CB -> H
NH -> C
HB -> C
HC -> B
HN -> C
NN -> C
BH -> H
NC -> B
NB -> B
BN -> B
BB -> N
BC -> B
CC -> N
CN -> C
";

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1588");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2188189693529");
    }

    #[test]
    fn test_single_step() {
        // NNCB -> NCNBCHB
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(element_spread(&shared, 1).unwrap(), 1);
        assert_eq!(element_spread(&shared, 0).unwrap(), 1);
    }

    #[test]
    fn test_pair_without_rule_is_stable() {
        let mut shared = Solver::parse("AB\n\nBA -> C").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "0");
    }

    #[test]
    fn test_malformed_rules() {
        assert!(Solver::parse("").is_err());
        assert!(Solver::parse("nn\n\nNN -> C").is_err());
        assert!(Solver::parse("NN\n\nNN => C").is_err());
        assert!(Solver::parse("NN\n\nNNN -> C").is_err());
        let err = Solver::parse("NN\n\nNN -> C\nNN -> B").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(ref msg) if msg.contains("line 4")));
    }
}
