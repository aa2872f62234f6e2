use thiserror::Error;

/// Errors raised by the tableau engine and the drivers built on it.
///
/// Contract violations (`DimensionMismatch`, `InconsistentBasis`, ...) are
/// detected before any state is produced. Unboundedness and permanent
/// infeasibility of a single solve are not errors; they are reported through
/// [`crate::SolutionStatus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Basic variable {variable} does not appear in the variable list")]
    InconsistentBasis { variable: String },
    #[error("Coefficients of basic variable {variable} (column {column}) changed; solve the problem again from scratch")]
    BasisCoefficientChanged { variable: String, column: usize },
    #[error("New constraint {row} does not carry a unit slack column")]
    NonUnitSlack { row: usize },
    #[error("Slack column {variable} (column {column}) must stay a unit column of the raw constraint matrix")]
    SlackColumnChanged { variable: String, column: usize },
    #[error("Variable {name} already exists")]
    DuplicateVariable { name: String },
    #[error("Solution is not optimal; no snapshot is available")]
    NotOptimal,
    #[error("Relaxation is unbounded in {variable}")]
    Unbounded { variable: String },
    #[error("No integer-feasible solution exists")]
    NoIntegerSolution,
    #[error("Iteration limit of {limit} reached")]
    IterationLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, SolverError>;
