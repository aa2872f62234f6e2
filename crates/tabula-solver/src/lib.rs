pub mod algebra;
pub mod basis;
mod branch;
mod error;
pub mod oracle;
pub mod pivot;
mod problem;
pub mod rational;
mod sensitivity;
mod simplex;
mod solution;
mod tableau;

pub use branch::{BranchAndBound, IntegerSolution};
pub use error::{Result, SolverError};
pub use pivot::PivotRule;
pub use problem::{Constraint, ConstraintOp, LpProblem, Objective};
pub use sensitivity::{Revision, SensitivityRequest, Snapshot};
pub use simplex::Solver;
pub use solution::{AlternateOptimum, Analysis, PivotStep, ReducedCost, ShadowPrice, Solution, SolutionStatus};
pub use tableau::Tableau;
