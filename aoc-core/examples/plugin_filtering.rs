//! Registering solvers as plugins and choosing which ones to load
//!
//! Run with: cargo run --example plugin_filtering

use aoc_core::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

/// Depth readings; part 1 counts increases, part 2 counts increases of a
/// three-wide sliding sum
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 1, tags = ["easy", "2021"])]
pub struct SonarSweep;

impl AocParser for SonarSweep {
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(idx, line)| line.trim().parse::<u32>().map_err(|e| ParseError::at_line(idx + 1, e)))
            .collect()
    }
}

fn increases(depths: &[u32], window: usize) -> usize {
    depths
        .iter()
        .zip(depths.iter().skip(window))
        .filter(|(a, b)| b > a)
        .count()
}

impl PartSolver<1> for SonarSweep {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(increases(shared, 1).to_string())
    }
}

impl PartSolver<2> for SonarSweep {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // a+b+c < b+c+d exactly when a < d
        Ok(increases(shared, 3).to_string())
    }
}

/// Part 1 only: the deepest reading
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2021, day = 2, tags = ["2021"])]
pub struct Deepest;

impl AocParser for Deepest {
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        SonarSweep::parse(input)
    }
}

impl PartSolver<1> for Deepest {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(u32::to_string)
            .ok_or_else(|| SolveError::failed(ParseError::MissingData("no readings".into())))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263";

    let everything = SolverRegistryBuilder::new().register_all_plugins()?.build();
    for info in everything.iter_info() {
        let mut solver = everything.create_solver(info.year, info.day, input)?;
        for part in 1..=info.parts {
            let result = solver.solve(part)?;
            println!(
                "{}/{:02} part {}: {} ({})",
                info.year,
                info.day,
                part,
                result.answer,
                result.duration()
            );
        }
    }

    let easy = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"easy"))?
        .build();
    println!(
        "tagged easy: {:?}",
        easy.iter_info().map(|info| (info.year, info.day)).collect::<Vec<_>>()
    );
    Ok(())
}
