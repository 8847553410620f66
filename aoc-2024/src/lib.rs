//! Advent of Code 2024 puzzle solutions with automatic registration
//!
//! Each day derives `AutoRegisterSolver`, so linking this crate is enough
//! for `SolverRegistryBuilder::register_all_plugins` to pick every day up.
//!
//! ```
//! use aoc_2024::year_2024::day_07::Day07;
//! use aoc_core::SolverRegistryBuilder;
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Day07>(2024, 7)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2024, 7, "190: 10 19\n83: 17 5").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "190");
//! ```

pub mod year_2024;
