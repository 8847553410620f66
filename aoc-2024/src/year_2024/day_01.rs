use anyhow::{anyhow, Context};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 1, tags = ["2024", "easy"])]
pub struct Day01;

/// The two columns of location IDs, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationLists {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
}

fn parse_pair(line: &str) -> Result<(u32, u32), anyhow::Error> {
    let (left, right) = line
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| anyhow!("expected two location IDs in {:?}", line))?;
    let left = left.parse::<u32>().with_context(|| format!("invalid ID {:?}", left))?;
    let right = right.parse::<u32>().with_context(|| format!("invalid ID {:?}", right))?;
    Ok((left, right))
}

impl AocParser for Day01 {
    type SharedData<'a> = LocationLists;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (left, right) = input
            .trim()
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                parse_pair(line).map_err(|e| ParseError::at_line(idx + 1, format!("{:#}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();
        Ok(LocationLists { left, right })
    }
}

impl PartSolver<1> for Day01 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(&shared.left, &shared.right).to_string())
    }
}

impl PartSolver<2> for Day01 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(similarity_score(&shared.left, &shared.right).to_string())
    }
}

/// Pair the smallest with the smallest, and so on, summing the gaps
pub fn total_distance(left: &[u32], right: &[u32]) -> u64 {
    left.iter()
        .sorted_unstable()
        .zip(right.iter().sorted_unstable())
        .map(|(l, r)| u64::from(l.abs_diff(*r)))
        .sum()
}

/// Each left ID weighted by how often it appears on the right
pub fn similarity_score(left: &[u32], right: &[u32]) -> u64 {
    let counts = right.iter().counts();
    left.iter()
        .map(|id| u64::from(*id) * counts.get(id).copied().unwrap_or(0) as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_core::Solver;

    const EXAMPLE: &str = "\
3   4
4   3
2   5
1   3
3   9
3   3
";

    #[test]
    fn example() {
        let mut lists = Day01::parse(EXAMPLE).unwrap();
        assert_eq!(lists.left, vec![3, 4, 2, 1, 3, 3]);
        assert_eq!(Day01::solve_part(&mut lists, 1).unwrap(), "11");
        assert_eq!(Day01::solve_part(&mut lists, 2).unwrap(), "31");
    }

    #[test]
    fn rejects_lines_without_two_ids() {
        assert!(matches!(
            Day01::parse("3 4\n5\n"),
            Err(ParseError::AtLine { line: 2, .. })
        ));
        assert!(Day01::parse("3 x").is_err());
        assert!(Day01::parse("1 2 3").is_err());
    }

    #[test]
    fn missing_ids_score_zero() {
        assert_eq!(similarity_score(&[7, 8], &[1, 2, 3]), 0);
        assert_eq!(total_distance(&[], &[]), 0);
    }
}
