use anyhow::{anyhow, bail, Context};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 5, tags = ["2024", "graph"])]
pub struct Day05;

/// `before|after`: if both pages are in an update, `before` must come first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    pub before: u32,
    pub after: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub pages: Vec<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("ordering rules form a cycle among pages {pages:?}")]
pub struct CyclicRules {
    pub pages: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct PrintQueue {
    pub rules: HashSet<Rule>,
    pub updates: Vec<Update>,
}

impl PrintQueue {
    pub fn is_ordered(&self, update: &Update) -> bool {
        update.pages.iter().enumerate().all(|(idx, &later)| {
            update.pages[..idx].iter().all(|&earlier| {
                !self.rules.contains(&Rule {
                    before: later,
                    after: earlier,
                })
            })
        })
    }

    /// Topological order of the update's pages under the rules that mention
    /// only those pages. Ties keep their original relative order.
    pub fn reorder(&self, update: &Update) -> Result<Update, CyclicRules> {
        let pages: HashSet<u32> = update.pages.iter().copied().collect();
        let mut incoming: HashMap<u32, usize> = pages.iter().map(|&page| (page, 0)).collect();
        let mut successors: HashMap<u32, Vec<u32>> = HashMap::new();
        for rule in &self.rules {
            if pages.contains(&rule.before) && pages.contains(&rule.after) {
                successors.entry(rule.before).or_default().push(rule.after);
                *incoming.entry(rule.after).or_default() += 1;
            }
        }

        let mut ready: VecDeque<u32> = update
            .pages
            .iter()
            .copied()
            .filter(|page| incoming.get(page) == Some(&0))
            .collect();
        let mut ordered = Vec::with_capacity(update.pages.len());
        while let Some(page) = ready.pop_front() {
            ordered.push(page);
            for next in successors.get(&page).into_iter().flatten() {
                if let Some(count) = incoming.get_mut(next) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(*next);
                    }
                }
            }
        }

        if ordered.len() < pages.len() {
            let mut stuck: Vec<u32> = incoming
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(page, _)| page)
                .collect();
            stuck.sort_unstable();
            return Err(CyclicRules { pages: stuck });
        }
        Ok(Update { pages: ordered })
    }
}

impl Update {
    pub fn middle(&self) -> Option<u32> {
        self.pages.get(self.pages.len() / 2).copied()
    }
}

fn parse_rule(line: &str) -> Result<Rule, anyhow::Error> {
    let (before, after) = line
        .split_once('|')
        .ok_or_else(|| anyhow!("expected 'a|b', got {:?}", line))?;
    Ok(Rule {
        before: before.trim().parse::<u32>().with_context(|| format!("invalid page {:?}", before))?,
        after: after.trim().parse::<u32>().with_context(|| format!("invalid page {:?}", after))?,
    })
}

fn parse_update(line: &str) -> Result<Update, anyhow::Error> {
    let pages = line
        .split(',')
        .map(|page| {
            page.trim()
                .parse::<u32>()
                .with_context(|| format!("invalid page {:?}", page))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(page) = pages.iter().duplicates().next() {
        bail!("page {} appears more than once", page);
    }
    Ok(Update { pages })
}

impl AocParser for Day05 {
    type SharedData<'a> = PrintQueue;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.trim().lines().enumerate();
        let rules = lines
            .by_ref()
            .take_while(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_rule(line).map_err(|e| ParseError::at_line(idx + 1, format!("{:#}", e)))
            })
            .collect::<Result<HashSet<_>, _>>()?;
        let updates = lines
            .map(|(idx, line)| {
                parse_update(line).map_err(|e| ParseError::at_line(idx + 1, format!("{:#}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if updates.is_empty() {
            return Err(ParseError::MissingData(
                "no updates after the ordering rules".into(),
            ));
        }
        Ok(PrintQueue { rules, updates })
    }
}

impl PartSolver<1> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .updates
            .iter()
            .filter(|update| shared.is_ordered(update))
            .filter_map(Update::middle)
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for update in shared.updates.iter().filter(|update| !shared.is_ordered(update)) {
            let fixed = shared.reorder(update).map_err(SolveError::failed)?;
            total += fixed.middle().unwrap_or(0);
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_core::Solver;

    const EXAMPLE: &str = "\
47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    #[test]
    fn example() {
        let mut queue = Day05::parse(EXAMPLE).unwrap();
        assert_eq!(queue.rules.len(), 21);
        assert_eq!(queue.updates.len(), 6);
        assert_eq!(Day05::solve_part(&mut queue, 1).unwrap(), "143");
        assert_eq!(Day05::solve_part(&mut queue, 2).unwrap(), "123");
    }

    #[test]
    fn reorders_the_known_cases() {
        let queue = Day05::parse(EXAMPLE).unwrap();
        let fixed: Vec<Vec<u32>> = queue
            .updates
            .iter()
            .filter(|update| !queue.is_ordered(update))
            .map(|update| queue.reorder(update).unwrap().pages)
            .collect();
        assert_eq!(
            fixed,
            vec![
                vec![97, 75, 47, 61, 53],
                vec![61, 29, 13],
                vec![97, 75, 47, 29, 13],
            ]
        );
    }

    #[test]
    fn cyclic_rules_fail_instead_of_looping() {
        let mut queue = Day05::parse("1|2\n2|3\n3|1\n\n3,2,1\n").unwrap();
        let err = queue.reorder(&queue.updates[0]).unwrap_err();
        assert_eq!(err, CyclicRules { pages: vec![1, 2, 3] });
        assert!(Day05::solve_part(&mut queue, 2).is_err());
    }

    #[test]
    fn rules_outside_the_update_are_ignored() {
        let queue = Day05::parse("1|2\n2|3\n3|1\n\n2,1\n").unwrap();
        assert_eq!(
            queue.reorder(&queue.updates[0]).unwrap(),
            Update { pages: vec![1, 2] }
        );
    }

    #[test]
    fn repeated_page_in_an_update_is_rejected() {
        let err = Day05::parse("1|2\n\n1,2\n2,1,2\n").unwrap_err();
        assert!(matches!(err, ParseError::AtLine { line: 4, .. }));
        assert!(err.to_string().contains("page 2 appears more than once"));
    }

    #[test]
    fn missing_updates_section() {
        assert!(matches!(
            Day05::parse("1|2\n2|3\n"),
            Err(ParseError::MissingData(_))
        ));
        assert!(matches!(
            Day05::parse("1|2\n2-3\n\n1,2"),
            Err(ParseError::AtLine { line: 2, .. })
        ));
    }
}
