//! Puzzle solver framework
//!
//! Every day of the puzzle series is a small, independent program: parse the
//! input text into a model, then compute one answer per part. This crate
//! gives those programs a common shape so a single runner can drive them.
//!
//! # Overview
//!
//! - [`AocParser`] turns raw text into a day's `SharedData`
//! - [`PartSolver<N>`] answers part `N`
//! - [`Solver`] dispatches a part number to the right `PartSolver`, usually
//!   through `#[derive(AocSolver)]`
//! - [`SolverRegistry`] maps `(year, day)` to factories producing
//!   [`DynSolver`] instances
//! - `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] so the
//!   registry can discover solvers without a hand-written list
//!
//! # Quick Example
//!
//! ```
//! use aoc_core::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Floors;
//!
//! impl AocParser for Floors {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .trim()
//!             .chars()
//!             .map(|c| match c {
//!                 '(' => Ok(1),
//!                 ')' => Ok(-1),
//!                 other => Err(ParseError::InvalidFormat(format!("unexpected {other:?}"))),
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Floors {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Floors {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         let mut floor = 0;
//!         for (idx, step) in shared.iter().enumerate() {
//!             floor += step;
//!             if floor < 0 {
//!                 return Ok((idx + 1).to_string());
//!             }
//!         }
//!         Err(SolveError::failed(std::fmt::Error))
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Floors>(2015, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2015, 1, "()())").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "-1");
//! assert_eq!(solver.solve(2).unwrap().answer, "5");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code `#[derive(AutoRegisterSolver)]` expands to
pub use inventory;

pub use aoc_core_macros::{AocSolver, AutoRegisterSolver};
