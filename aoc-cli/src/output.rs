//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(answer), false) => println!("{}", format_answer(result, answer)),
            (Err(e), _) => eprintln!("{}: Error - {}", prefix(result), e),
        }
    }

    /// Totals after the run; wall-clock time next to summed compute time
    /// shows how much the pool helped
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = results.len() - successes;
        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results.iter().map(|r| r.solve_duration).sum();
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", successes, failures);
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        match TimeDelta::from_std(elapsed) {
            Ok(wall) => {
                println!("Elapsed wall-clock time: {}", format_duration(wall));
                if !elapsed.is_zero() {
                    let compute = (total_parse_time + total_solve_time)
                        .num_microseconds()
                        .unwrap_or(0) as f64
                        / 1_000_000.0;
                    println!("Speedup factor: {:.2}x", compute / elapsed.as_secs_f64());
                }
            }
            Err(_) => println!("Elapsed wall-clock time: N/A"),
        }
    }
}

fn prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

/// One line per result; answers spanning several lines (rendered
/// pictures) start on the line after the timing
fn format_answer(result: &SolverResult, answer: &str) -> String {
    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    let timing = format!("({}solve: {})", parse_timing, format_duration(result.solve_duration));

    if answer.contains('\n') {
        format!("{}: {}\n{}", prefix(result), timing, answer)
    } else {
        format!("{}: {} {}", prefix(result), answer, timing)
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        format!("-{}", format_duration(-d))
    } else if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}
