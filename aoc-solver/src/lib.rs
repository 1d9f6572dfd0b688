//! Advent of Code Solver Library
//!
//! A small type-safe framework for Advent of Code puzzle units. Each unit
//! parses its input once into shared data and then answers any of its parts.
//!
//! # Overview
//!
//! - [`AocParser`] defines the parsed representation of the input
//! - [`PartSolver<N>`] answers part `N`
//! - [`Solver`] ties the parts together (usually via `#[derive(AocSolver)]`)
//! - [`RegistryBuilder`] / [`SolverRegistry`] map (year, day) to solvers
//! - `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] so the
//!   registry can discover solvers without a central list
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, RegistryBuilder, SolveError};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(4).filter(|w| w[3] > w[0]).count().to_string())
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register_solver::<Depths>(2021, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "1\n3\n2\n4").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! assert_eq!(solver.solve(2).unwrap().answer, "1");
//! ```
//!
//! # Part Dependencies
//!
//! Parts receive `&mut SharedData`, so an earlier part may cache work for a
//! later one. A part must still produce its answer when run on its own.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, RegistryBuilder, Slot, SolverFactory, SolverFactoryStorage,
    SolverPlugin, SolverRegistry, DAYS, FIRST_YEAR, YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-exported for the derive macros
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
