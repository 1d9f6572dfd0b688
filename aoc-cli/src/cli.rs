//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// How work is spread over the thread pool
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Everything in order on one worker
    Sequential,
    /// One task per year; days within a year run in order
    Year,
    /// One task per year/day; parts of a day share one parsed input
    #[default]
    Day,
    /// One task per year/day/part; each part parses its own input
    Part,
}

/// Advent of Code 2021 solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers against local inputs", version)]
pub struct Args {
    /// Year to run (all registered years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (both parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying every one of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Read this file instead of searching the input directory; needs a
    /// filter that selects exactly one solver
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Only print answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
