//! Parser and solver traits implemented by each day

use crate::error::{ParseError, SolveError};

/// Turns a day's raw puzzle text into the data its parts work on.
///
/// The data lives in `SharedData`, which every part receives mutably, so a
/// part may stash intermediate results for later parts to reuse.
///
/// # Example
///
/// ```
/// use aoc_core::{AocParser, ParseError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(idx, l)| l.parse().map_err(|e| ParseError::at_line(idx + 1, e)))
///             .collect()
///     }
/// }
///
/// assert_eq!(Depths::parse("199\n200").unwrap(), vec![199, 200]);
/// ```
pub trait AocParser {
    /// Parsed input plus any cached intermediate results.
    ///
    /// The lifetime allows zero-copy data borrowing from the input text.
    type SharedData<'a>;

    /// Parse the whole puzzle input.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// One part of a puzzle, selected at compile time by `N`.
///
/// # Example
///
/// ```
/// use aoc_core::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|t| t.parse().map_err(|_| ParseError::InvalidFormat(t.into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
///     }
/// }
///
/// let mut data = Depths::parse("199 200 208 200").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut data).unwrap(), "2");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete day: a parser plus a dispatch over its parts.
///
/// Usually derived with `#[derive(AocSolver)]`, which forwards each part to the
/// matching [`PartSolver`] implementation.
///
/// # Example
///
/// ```
/// use aoc_core::{AocParser, ParseError, SolveError, Solver};
///
/// struct Calories;
///
/// impl AocParser for Calories {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split("\n\n")
///             .map(|elf| {
///                 elf.lines()
///                     .map(|l| l.parse::<u32>().map_err(|e| ParseError::InvalidFormat(e.to_string())))
///                     .sum::<Result<u32, ParseError>>()
///             })
///             .collect()
///     }
/// }
///
/// impl Solver for Calories {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         shared.sort_unstable_by(|a, b| b.cmp(a));
///         match part {
///             1 => Ok(shared[0].to_string()),
///             2 => Ok(shared.iter().take(3).sum::<u32>().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut elves = Calories::parse("1\n2\n\n10\n\n4").unwrap();
/// assert_eq!(Calories::solve_part(&mut elves, 1).unwrap(), "10");
/// assert_eq!(Calories::solve_part(&mut elves, 2).unwrap(), "17");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve one part.
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - No such part
    /// * `Err(SolveError::SolveFailed)` - The puzzle computation failed
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects parts outside `1..=PARTS`
    /// before touching the shared data.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
