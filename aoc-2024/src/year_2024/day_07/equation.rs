use super::search::{search, Operator};
use anyhow::{anyhow, bail, Context};
use std::str::FromStr;

/// `target: operand operand ...`, operands kept in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

impl Equation {
    pub fn new(target: u64, operands: Vec<u64>) -> Self {
        Self { target, operands }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn operands(&self) -> &[u64] {
        &self.operands
    }

    pub fn is_solvable(&self, operators: &[Operator]) -> bool {
        search(&self.operands, operators, self.target)
    }
}

impl FromStr for Equation {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (target, operands) = line
            .split_once(':')
            .ok_or_else(|| anyhow!("missing ':' separator in {:?}", line))?;

        let target = target
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid target {:?}", target.trim()))?;
        let operands = operands
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u64>()
                    .with_context(|| format!("invalid operand {:?}", token))
            })
            .collect::<Result<Vec<u64>, _>>()?;
        if operands.is_empty() {
            bail!("no operands after ':'");
        }

        Ok(Self { target, operands })
    }
}
