//! `aoc` - run Advent of Code 2021 solvers against local inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod logger;
mod output;

// Link the 2021 puzzle units so their plugins are collected
use aoc_2021 as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{RegistryBuilder, SolverRegistry};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use output::OutputFormatter;
use tracing::warn;

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every requested part produced an answer
fn run(args: Args) -> Result<bool, CliError> {
    let config = Config::from_args(args);
    logger::init_cli_logger(config.verbosity)?;

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(|e| CliError::Executor(e.into()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(true);
    }
    if let Some(file) = &config.input_file
        && work_items.len() != 1
    {
        return Err(CliError::Config(format!(
            "--input {} matches {} solvers; narrow it down with --year and --day",
            file.display(),
            work_items.len()
        )));
    }

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }
    run_executor(executor, &work_items, config.quiet)
}

/// Run on a background thread and print results in order as they arrive
fn run_executor(executor: Executor, work_items: &[WorkItem], quiet: bool) -> Result<bool, CliError> {
    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    });

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    let complete = aggregator.is_complete();
    if !complete {
        warn!("not every expected result was received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("executor thread panicked".to_string()))??;

    formatter.print_summary(&results);
    Ok(complete && results.iter().all(|r| r.answer.is_ok()))
}

/// All plugins, or those carrying every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
