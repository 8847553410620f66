//! Error types shared by every solver

use thiserror::Error;

/// Error raised while turning puzzle text into a day's model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input doesn't match the expected shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Something the puzzle needs is absent from the input
    #[error("Missing data: {0}")]
    MissingData(String),
    /// A specific line (1-based) could not be parsed
    #[error("Line {line}: {message}")]
    AtLine { line: usize, message: String },
}

impl ParseError {
    /// Attach a 1-based line number to any displayable cause
    pub fn at_line(line: usize, cause: impl std::fmt::Display) -> Self {
        Self::AtLine {
            line,
            message: cause.to_string(),
        }
    }
}

/// Error raised while solving one part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver has no implementation for this part
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The part is 0 or above the solver's part count
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The puzzle-specific computation failed
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap a day-specific error
    pub fn failed<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SolveFailed(Box::new(err))
    }
}

/// Error raised when looking up, creating or running a solver
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver registered for this year and day
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// Year or day outside the supported range
    #[error("Invalid year {0} or day {1}")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error raised while building a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A solver is already registered for this year and day
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// Year or day outside the supported range
    #[error("Cannot register year {0} day {1}: out of supported range")]
    InvalidYearDay(u16, u8),
}
