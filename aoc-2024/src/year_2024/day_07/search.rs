//! Depth-first search over left-to-right operator assignments

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Binary operator placed between two consecutive operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Multiply,
    /// Appends the right operand's decimal digits to the left one
    Concatenate,
}

/// `+` and `*`
pub const ADD_MULTIPLY: &[Operator] = &[Operator::Add, Operator::Multiply];

/// `+`, `*` and `||`
pub const ADD_MULTIPLY_CONCAT: &[Operator] =
    &[Operator::Add, Operator::Multiply, Operator::Concatenate];

impl Operator {
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Multiply => "*",
            Operator::Concatenate => "||",
        }
    }

    /// Apply the operator, `None` on `u64` overflow
    pub fn apply(self, lhs: u64, rhs: u64) -> Option<u64> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Concatenate => concatenate(lhs, rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Operator symbol outside `+`, `*`, `||`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid operator {0:?}, expected one of \"+\", \"*\", \"||\"")]
pub struct InvalidOperator(pub String);

impl FromStr for Operator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "*" => Ok(Operator::Multiply),
            "||" => Ok(Operator::Concatenate),
            other => Err(InvalidOperator(other.to_string())),
        }
    }
}

/// Parse every symbol, failing on the first unknown one
pub fn parse_operators<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<Operator>, InvalidOperator> {
    symbols.iter().map(|s| s.as_ref().parse()).collect()
}

/// `12 || 345 == 12345`, `0 || 5 == 5`. `None` on overflow.
pub fn concatenate(lhs: u64, rhs: u64) -> Option<u64> {
    let digits = rhs.checked_ilog10().map_or(1, |log| log + 1);
    10u64
        .checked_pow(digits)?
        .checked_mul(lhs)?
        .checked_add(rhs)
}

/// A point in the implicit trie of partial folds.
///
/// `value` is the fold of `operands[..depth]`; the node's children apply each
/// operator between `value` and `operands[depth]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationNode {
    pub value: u64,
    pub depth: usize,
}

impl CombinationNode {
    /// Node holding the first operand, `None` when there are no operands
    pub fn root(operands: &[u64]) -> Option<Self> {
        operands.first().map(|&value| Self { value, depth: 1 })
    }

    pub fn is_leaf(&self, operands: &[u64]) -> bool {
        self.depth >= operands.len()
    }

    /// One child per operator, in operator order. Overflowing branches are
    /// skipped; leaves have no children.
    pub fn children<'a>(
        self,
        operands: &'a [u64],
        operators: &'a [Operator],
    ) -> impl DoubleEndedIterator<Item = CombinationNode> + 'a {
        let next = operands.get(self.depth).copied();
        operators.iter().filter_map(move |op| {
            let value = op.apply(self.value, next?)?;
            Some(CombinationNode {
                value,
                depth: self.depth + 1,
            })
        })
    }
}

/// Whether some left-associative assignment of `operators` between the
/// `operands` folds to exactly `target`.
///
/// Explores the trie depth-first with an explicit stack and returns on the
/// first matching leaf. When every operand is positive each operator is
/// non-decreasing, so branches already above `target` are dropped.
pub fn search(operands: &[u64], operators: &[Operator], target: u64) -> bool {
    let Some(root) = CombinationNode::root(operands) else {
        return false;
    };
    let prune = !operands.contains(&0);

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_leaf(operands) {
            if node.value == target {
                return true;
            }
            continue;
        }
        if prune && node.value > target {
            continue;
        }
        // reversed so the first operator is explored first
        stack.extend(node.children(operands, operators).rev());
    }
    false
}

/// [`search`] with operators given by symbol
pub fn search_symbols<S: AsRef<str>>(
    operands: &[u64],
    symbols: &[S],
    target: u64,
) -> Result<bool, InvalidOperator> {
    let operators = parse_operators(symbols)?;
    Ok(search(operands, &operators, target))
}

/// Every leaf value of the trie, in depth-first operator order
pub fn reachable_values(operands: &[u64], operators: &[Operator]) -> Vec<u64> {
    let mut leaves = Vec::new();
    let mut stack: Vec<CombinationNode> = CombinationNode::root(operands).into_iter().collect();
    while let Some(node) = stack.pop() {
        if node.is_leaf(operands) {
            leaves.push(node.value);
        } else {
            stack.extend(node.children(operands, operators).rev());
        }
    }
    leaves
}
