//! Advent of Code 2021 puzzle units
//!
//! Every unit lives in `year_2021::day_NN` as a `Solver` type and registers
//! itself through `#[derive(AutoRegisterSolver)]`, so linking this crate is
//! enough for `RegistryBuilder::register_all_plugins` to find it.

pub mod utils;
pub mod year_2021;
