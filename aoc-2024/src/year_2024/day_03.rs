use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use regex::Regex;
use std::sync::LazyLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 3, tags = ["2024", "regex"])]
pub struct Day03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Mul(u64, u64),
    Do,
    Dont,
}

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)")
        .expect("instruction pattern is a valid regex")
});

/// Every well-formed instruction buried in the corrupted memory, in order
pub fn scan(memory: &str) -> Result<Vec<Instruction>, ParseError> {
    INSTRUCTION
        .captures_iter(memory)
        .map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(a), Some(b)) => {
                let operand = |m: regex::Match<'_>| {
                    m.as_str()
                        .parse::<u64>()
                        .map_err(|e| ParseError::InvalidFormat(format!("{:?}: {}", m.as_str(), e)))
                };
                Ok(Instruction::Mul(operand(a)?, operand(b)?))
            }
            _ if &caps[0] == "do()" => Ok(Instruction::Do),
            _ => Ok(Instruction::Dont),
        })
        .collect()
}

impl AocParser for Day03 {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        scan(input)
    }
}

impl PartSolver<1> for Day03 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared, false).to_string())
    }
}

impl PartSolver<2> for Day03 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared, true).to_string())
    }
}

/// Sum of enabled products. Without `conditionals`, `do()` and `don't()` are
/// ignored and every product counts.
pub fn run(instructions: &[Instruction], conditionals: bool) -> u64 {
    instructions
        .iter()
        .fold((true, 0), |(enabled, total), instruction| match instruction {
            Instruction::Mul(a, b) if enabled || !conditionals => (enabled, total + a * b),
            Instruction::Mul(..) => (enabled, total),
            Instruction::Do => (true, total),
            Instruction::Dont => (false, total),
        })
        .1
}
