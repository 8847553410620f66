//! Day 7: Bridge Repair
//!
//! Each line is a calibration equation whose operators were lost. An equation
//! counts when some left-to-right assignment of operators reproduces its
//! target; the answer is the sum of those targets.

mod equation;
mod search;

pub use equation::Equation;
pub use search::{
    concatenate, parse_operators, reachable_values, search, search_symbols, CombinationNode,
    InvalidOperator, Operator, ADD_MULTIPLY, ADD_MULTIPLY_CONCAT,
};

use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use log::debug;
use rayon::prelude::*;
use thiserror::Error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["2024", "search"])]
pub struct Day07;

impl AocParser for Day07 {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                line.parse::<Equation>()
                    .map_err(|e| ParseError::at_line(idx + 1, format!("{:#}", e)))
            })
            .collect()
    }
}

impl PartSolver<1> for Day07 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = calibration_total(shared, ADD_MULTIPLY).map_err(SolveError::failed)?;
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Day07 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = calibration_total(shared, ADD_MULTIPLY_CONCAT).map_err(SolveError::failed)?;
        Ok(total.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sum of solvable targets does not fit in u64")]
pub struct CalibrationOverflow;

/// Sum of the targets of every equation solvable with `operators`
pub fn calibration_total(
    equations: &[Equation],
    operators: &[Operator],
) -> Result<u64, CalibrationOverflow> {
    let (count, total) = equations
        .par_iter()
        .filter(|equation| equation.is_solvable(operators))
        .map(|equation| Some((1usize, equation.target())))
        .try_reduce(
            || (0, 0),
            |(c1, t1), (c2, t2)| Some((c1 + c2, t1.checked_add(t2)?)),
        )
        .ok_or(CalibrationOverflow)?;

    debug!(
        "{} of {} equations solvable with [{}]",
        count,
        equations.len(),
        operators.iter().map(|op| op.symbol()).collect::<Vec<_>>().join(" ")
    );
    Ok(total)
}
