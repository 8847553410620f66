//! Registry of solver factories keyed by year and day

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;
use log::trace;

// ============================================================================
// Storage layout
// ============================================================================

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years addressable by the registry (2015-2034)
pub const MAX_YEARS: usize = 20;
/// Puzzle days per year
pub const DAYS_PER_YEAR: usize = 25;
/// Slots in the flat storage
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Flat slot for a year/day, or `None` when out of range
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if !(BASE_YEAR..BASE_YEAR + MAX_YEARS as u16).contains(&year) {
        return None;
    }
    if day == 0 || day as usize > DAYS_PER_YEAR {
        return None;
    }
    Some((year - BASE_YEAR) as usize * DAYS_PER_YEAR + (day - 1) as usize)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

// ============================================================================
// Factories
// ============================================================================

/// Parses input into a ready-to-solve instance. Shareable across threads.
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What the registry knows about one registered day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Collects solver factories, then freezes them into a [`SolverRegistry`].
///
/// # Example
///
/// ```
/// use aoc_core::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
///
/// struct Echo;
///
/// impl AocParser for Echo {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim())
///     }
/// }
///
/// impl Solver for Echo {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _: u8) -> Result<String, SolveError> {
///         Ok(shared.to_string())
///     }
/// }
///
/// let registry = SolverRegistryBuilder::new()
///     .register::<Echo>(2024, 1)
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(2024, 1, " hi ").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "hi");
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistryBuilder {
    /// Create a builder with every slot empty
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a raw factory for `year`/`day` that supports `parts` parts.
    ///
    /// # Returns
    /// * `Err(RegistrationError::InvalidYearDay)` - year/day outside the storage
    /// * `Err(RegistrationError::DuplicateSolver)` - slot already taken
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        let slot = &mut self.entries[index];
        if slot.is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        trace!("registering {}/{:02} with {} part(s)", year, day, parts);
        *slot = Some(FactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register solver type `S` for `year`/`day`
    pub fn register<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    /// Register every plugin submitted through `inventory`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins accepted by `filter`.
    ///
    /// ```no_run
    /// # use aoc_core::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2024 && plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable lookup of solver factories with O(1) access by year/day
pub struct SolverRegistry {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistry {
    /// Metadata for every registered day, ascending by (year, day)
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        let entry = self.entries.get(calc_index(year, day)?)?.as_ref()?;
        Some(FactoryInfo {
            year,
            day,
            parts: entry.parts,
        })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Parse `input` with the solver registered for `year`/`day`.
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynSolver>)` - parsed instance, ready to solve
    /// * `Err(SolverError::InvalidYearDay)` - year/day outside the storage
    /// * `Err(SolverError::NotFound)` - nothing registered there
    /// * `Err(SolverError::ParseError)` - the input was rejected
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;
        let entry = self.entries[index]
            .as_ref()
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

// ============================================================================
// Plugins
// ============================================================================

/// Object-safe registration hook, implemented for every [`Solver`].
///
/// Lets solvers of different types sit side by side in the plugin inventory.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted for link-time collection.
///
/// Normally produced by `#[derive(AutoRegisterSolver)]`; written by hand it
/// looks like:
///
/// ```ignore
/// inventory::submit! {
///     SolverPlugin { year: 2024, day: 6, solver: &Day06, tags: &["grid"] }
/// }
/// ```
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used for filtering, e.g. "grid" or "search"
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;

    struct Lines;

    impl AocParser for Lines {
        type SharedData<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("no lines".into()));
            }
            Ok(input.lines().collect())
        }
    }

    impl Solver for Lines {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                2 => Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn index_round_trips_at_the_edges() {
        for (year, day) in [(2015, 1), (2015, 25), (2024, 7), (2034, 25)] {
            let index = calc_index(year, day).unwrap();
            assert!(index < CAPACITY);
            assert_eq!(from_index(index), (year, day));
        }
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(2035, 1), None);
        assert_eq!(calc_index(2024, 0), None);
        assert_eq!(calc_index(2024, 26), None);
    }

    #[test]
    fn duplicate_and_out_of_range_registrations_fail() {
        let builder = SolverRegistryBuilder::new().register::<Lines>(2024, 1).unwrap();
        assert!(matches!(
            builder.register::<Lines>(2024, 1),
            Err(RegistrationError::DuplicateSolver(2024, 1))
        ));
        assert!(matches!(
            SolverRegistryBuilder::new().register::<Lines>(2040, 1),
            Err(RegistrationError::InvalidYearDay(2040, 1))
        ));
    }

    #[test]
    fn create_solver_reports_lookup_and_parse_failures() {
        let registry = SolverRegistryBuilder::new()
            .register::<Lines>(2024, 2)
            .unwrap()
            .build();

        assert!(matches!(
            registry.create_solver(2024, 3, "a"),
            Err(SolverError::NotFound(2024, 3))
        ));
        assert!(matches!(
            registry.create_solver(1999, 3, "a"),
            Err(SolverError::InvalidYearDay(1999, 3))
        ));
        assert!(matches!(
            registry.create_solver(2024, 2, ""),
            Err(SolverError::ParseError(ParseError::MissingData(_)))
        ));

        let mut solver = registry.create_solver(2024, 2, "ab\ncde").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "2");
        assert_eq!(solver.solve(2).unwrap().answer, "5");
    }

    #[test]
    fn info_is_listed_in_year_day_order() {
        let registry = SolverRegistryBuilder::new()
            .register::<Lines>(2024, 5)
            .unwrap()
            .register::<Lines>(2016, 25)
            .unwrap()
            .register::<Lines>(2024, 1)
            .unwrap()
            .build();

        let listed: Vec<_> = registry.iter_info().map(|i| (i.year, i.day)).collect();
        assert_eq!(listed, vec![(2016, 25), (2024, 1), (2024, 5)]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(registry.contains(2024, 5));
        assert_eq!(
            registry.get_info(2024, 1),
            Some(FactoryInfo { year: 2024, day: 1, parts: 2 })
        );
    }

    #[test]
    fn registerable_solver_reports_parts() {
        let plugin: &dyn RegisterableSolver = &Lines;
        assert_eq!(plugin.parts(), 2);
        let registry = plugin
            .register_with(SolverRegistryBuilder::default(), 2020, 4)
            .unwrap()
            .build();
        assert!(registry.contains(2020, 4));
    }
}
