use std::collections::HashMap;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 12, tags = ["2021", "graph"])]
pub struct Solver;

/// Cave graph with caves numbered in order of first appearance
#[derive(Debug)]
pub struct CaveSystem {
    small: Vec<bool>,
    adjacent: Vec<Vec<usize>>,
    start: usize,
    end: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = CaveSystem;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_caves(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_caves(input: &str) -> anyhow::Result<CaveSystem> {
    let mut edges = Vec::new();
    for (line_idx, line) in input.lines().map(str::trim).enumerate() {
        if line.is_empty() {
            continue;
        }
        let edge = line
            .split_once('-')
            .filter(|(a, b)| !a.is_empty() && !b.is_empty())
            .ok_or_else(|| anyhow!("(line {}) expected `a-b`, found {:?}", line_idx + 1, line))?;
        edges.push((line_idx + 1, edge));
    }

    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut names = Vec::new();
    for name in edges.iter().flat_map(|&(_, (a, b))| [a, b]) {
        if !ids.contains_key(name) {
            ids.insert(name, names.len());
            names.push(name);
        }
    }

    if let Some(name) = names
        .iter()
        .find(|name| {
            name.chars().any(|c| c.is_ascii_lowercase())
                && name.chars().any(|c| c.is_ascii_uppercase())
        })
    {
        bail!("cave {:?} mixes upper and lower case", name);
    }

    let small: Vec<bool> = names
        .iter()
        .map(|name| name.chars().all(|c| !c.is_ascii_uppercase()))
        .collect();
    let mut adjacent = vec![Vec::new(); names.len()];
    for (line, (a, b)) in edges {
        let (a, b) = (ids[a], ids[b]);
        // Paths through two adjacent big caves never terminate
        if !small[a] && !small[b] {
            bail!(
                "(line {}) big caves {:?} and {:?} are directly connected",
                line,
                names[a],
                names[b]
            );
        }
        adjacent[a].push(b);
        adjacent[b].push(a);
    }

    let start = *ids.get("start").ok_or_else(|| anyhow!("no `start` cave"))?;
    let end = *ids.get("end").ok_or_else(|| anyhow!("no `end` cave"))?;

    Ok(CaveSystem {
        small,
        adjacent,
        start,
        end,
    })
}

impl CaveSystem {
    /// Paths from `start` to `end`; with `revisit_allowed` one small cave may
    /// be entered twice
    fn count_paths(&self, revisit_allowed: bool) -> u64 {
        let mut visits = vec![0u16; self.small.len()];
        visits[self.start] = 1;
        self.explore(self.start, &mut visits, revisit_allowed)
    }

    fn explore(&self, cave: usize, visits: &mut [u16], revisit_allowed: bool) -> u64 {
        if cave == self.end {
            return 1;
        }
        let mut paths = 0;
        for &next in &self.adjacent[cave] {
            if next == self.start {
                continue;
            }
            let revisiting = self.small[next] && visits[next] > 0;
            if revisiting && !revisit_allowed {
                continue;
            }
            visits[next] += 1;
            paths += self.explore(next, visits, revisit_allowed && !revisiting);
            visits[next] -= 1;
        }
        paths
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_paths(false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_paths(true).to_string())
    }
}
