use anyhow::Context;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 2, tags = ["2024", "easy"])]
pub struct Day02;

/// What counts as a safe report.
///
/// Adjacent levels must all move in the same direction by a step within
/// `min_step..=max_step`. Up to `max_faults` levels may be dropped to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyPolicy {
    pub min_step: u32,
    pub max_step: u32,
    pub max_faults: usize,
}

impl SafetyPolicy {
    pub const STRICT: Self = Self {
        min_step: 1,
        max_step: 3,
        max_faults: 0,
    };

    pub const DAMPENED: Self = Self {
        max_faults: 1,
        ..Self::STRICT
    };

    fn accepts_steps<'a>(&self, levels: impl Iterator<Item = &'a u32>) -> bool {
        let mut direction = None;
        levels.tuple_windows().all(|(a, b)| {
            let rising = b > a;
            let step = a.abs_diff(*b);
            (self.min_step..=self.max_step).contains(&step)
                && *direction.get_or_insert(rising) == rising
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub levels: Vec<u32>,
}

impl Report {
    /// Safe once some set of at most `max_faults` removed levels leaves an
    /// acceptable sequence. Smaller removal sets are tried first.
    pub fn is_safe(&self, policy: &SafetyPolicy) -> bool {
        let len = self.levels.len();
        (0..=policy.max_faults.min(len)).any(|faults| {
            (0..len).combinations(faults).any(|removed| {
                let kept = self
                    .levels
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| !removed.contains(idx))
                    .map(|(_, level)| level);
                policy.accepts_steps(kept)
            })
        })
    }
}

impl AocParser for Day02 {
    type SharedData<'a> = Vec<Report>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                line.split_whitespace()
                    .map(|token| {
                        token
                            .parse::<u32>()
                            .with_context(|| format!("invalid level {:?}", token))
                    })
                    .collect::<Result<Vec<u32>, _>>()
                    .map(|levels| Report { levels })
                    .map_err(|e| ParseError::at_line(idx + 1, format!("{:#}", e)))
            })
            .collect()
    }
}

impl PartSolver<1> for Day02 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_safe(shared, &SafetyPolicy::STRICT).to_string())
    }
}

impl PartSolver<2> for Day02 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_safe(shared, &SafetyPolicy::DAMPENED).to_string())
    }
}

pub fn count_safe(reports: &[Report], policy: &SafetyPolicy) -> usize {
    reports.iter().filter(|report| report.is_safe(policy)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_core::Solver;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
";

    fn report(levels: &[u32]) -> Report {
        Report {
            levels: levels.to_vec(),
        }
    }

    #[test]
    fn example() {
        let mut reports = Day02::parse(EXAMPLE).unwrap();
        assert_eq!(Day02::solve_part(&mut reports, 1).unwrap(), "2");
        assert_eq!(Day02::solve_part(&mut reports, 2).unwrap(), "4");
    }

    #[test]
    fn strict_policy() {
        assert!(report(&[7, 6, 4, 2, 1]).is_safe(&SafetyPolicy::STRICT));
        assert!(!report(&[1, 2, 7, 8, 9]).is_safe(&SafetyPolicy::STRICT));
        assert!(!report(&[1, 3, 2, 4, 5]).is_safe(&SafetyPolicy::STRICT));
        assert!(!report(&[8, 6, 4, 4, 1]).is_safe(&SafetyPolicy::STRICT));
    }

    #[test]
    fn one_fault_tolerated() {
        assert!(report(&[1, 3, 2, 4, 5]).is_safe(&SafetyPolicy::DAMPENED));
        assert!(report(&[8, 6, 4, 4, 1]).is_safe(&SafetyPolicy::DAMPENED));
        assert!(!report(&[9, 7, 6, 2, 1]).is_safe(&SafetyPolicy::DAMPENED));
    }

    #[test]
    fn two_faults_tolerated() {
        let levels = report(&[4, 2, 6, 3, 4, 7, 8]);
        assert!(!levels.is_safe(&SafetyPolicy::DAMPENED));
        let lenient = SafetyPolicy {
            max_faults: 2,
            ..SafetyPolicy::STRICT
        };
        assert!(levels.is_safe(&lenient));
    }

    #[test]
    fn short_reports_are_safe() {
        assert!(report(&[5]).is_safe(&SafetyPolicy::STRICT));
        assert!(report(&[]).is_safe(&SafetyPolicy::STRICT));
    }

    #[test]
    fn bad_level_reports_line() {
        assert!(matches!(
            Day02::parse("1 2 3\n1 two 3"),
            Err(ParseError::AtLine { line: 2, .. })
        ));
    }

    proptest! {
        #[test]
        fn more_tolerance_never_rejects_a_safe_report(
            levels in prop::collection::vec(0u32..20, 0..8),
            faults in 0usize..3,
        ) {
            let levels = report(&levels);
            let tight = SafetyPolicy { max_faults: faults, ..SafetyPolicy::STRICT };
            let loose = SafetyPolicy { max_faults: faults + 1, ..SafetyPolicy::STRICT };
            if levels.is_safe(&tight) {
                prop_assert!(levels.is_safe(&loose));
            }
        }
    }
}
