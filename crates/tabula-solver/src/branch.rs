//! Branch-and-Bound over the simplex engine.
//!
//! Children are derived from the parent's optimal snapshot by appending a
//! bound row through the post-optimal constraint path, so each child starts
//! from a basis that only needs a few dual pivots to become feasible again.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::basis::locate_basis;
use crate::error::{Result, SolverError};
use crate::rational::{correct, is_integer};
use crate::sensitivity::Revision;
use crate::simplex::Solver;
use crate::solution::{Solution, SolutionStatus};
use crate::tableau::Tableau;

/// Best integer-feasible solution found by [`BranchAndBound`]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerSolution {
    /// Objective value (maximisation sense)
    pub objective: f64,
    /// Value of every structural variable
    pub assignment: BTreeMap<String, f64>,
    /// Subproblems solved during the search
    pub nodes: usize,
    /// Final tableau of the winning subproblem
    pub tableau: Tableau,
}

/// Depth-first Branch-and-Bound driver
pub struct BranchAndBound {
    solver: Solver,
    /// Objective an integer solution must beat
    incumbent: f64,
    /// Maximum subproblems before giving up
    max_nodes: usize,
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self {
            solver: Solver::default(),
            incumbent: f64::NEG_INFINITY,
            max_nodes: 100_000,
        }
    }
}

struct Node {
    revision: Revision,
    depth: usize,
}

struct Branch {
    column: usize,
    value: f64,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_incumbent(mut self, bound: f64) -> Self {
        self.incumbent = bound;
        self
    }

    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = max;
        self
    }

    /// Maximise over the tableau with `integer[j]` requiring structural
    /// variable `j` to be integral.
    pub fn solve(&self, tableau: &Tableau, integer: &[bool]) -> Result<IntegerSolution> {
        tableau.validate()?;
        let n = tableau.structural();
        if integer.len() != n {
            return Err(SolverError::DimensionMismatch {
                what: "integer requirements",
                expected: n,
                found: integer.len(),
            });
        }

        let mut best_objective = self.incumbent;
        let mut best: Option<IntegerSolution> = None;
        let mut nodes = 0;
        let mut stack = vec![Node {
            revision: Revision {
                tableau: tableau.clone(),
                initial_a: tableau.a.clone(),
            },
            depth: 0,
        }];

        while let Some(node) = stack.pop() {
            if nodes >= self.max_nodes {
                return Err(SolverError::IterationLimit { limit: self.max_nodes });
            }
            nodes += 1;

            let solution = self.solver.resolve(&node.revision)?;
            match &solution.status {
                SolutionStatus::Optimal => {}
                SolutionStatus::Infeasible { .. } => {
                    debug!("node {} (depth {}) infeasible", nodes, node.depth);
                    continue;
                }
                SolutionStatus::Unbounded { variable, .. } => {
                    return Err(SolverError::Unbounded {
                        variable: variable.clone(),
                    });
                }
            }

            let objective = solution.objective();
            if correct(objective) <= correct(best_objective) {
                debug!("node {} pruned at {}", nodes, objective);
                continue;
            }

            let Some(branch) = fractional_variable(&solution, n, integer)? else {
                info!("node {}: integer solution with objective {}", nodes, objective);
                best_objective = objective;
                best = Some(IntegerSolution {
                    objective,
                    assignment: assignment(&solution.tableau, n),
                    nodes,
                    tableau: solution.tableau,
                });
                continue;
            };

            debug!(
                "node {} (depth {}): branching on {} = {}",
                nodes,
                node.depth,
                solution.tableau.x[branch.column],
                branch.value
            );

            let snapshot = solution.snapshot()?;
            let cols = solution.tableau.cols();
            let bound_row = |sign: f64| {
                let mut row = vec![0.0; cols + 1];
                row[branch.column] = sign;
                row[cols] = 1.0;
                row
            };

            // x >= ceil(v) goes on the stack first; x <= floor(v) is explored first
            let upper = snapshot.add_constraints(&[bound_row(-1.0)], &[-branch.value.ceil()], None)?;
            let lower = snapshot.add_constraints(&[bound_row(1.0)], &[branch.value.floor()], None)?;
            stack.push(Node {
                revision: upper,
                depth: node.depth + 1,
            });
            stack.push(Node {
                revision: lower,
                depth: node.depth + 1,
            });
        }

        match best {
            Some(mut solution) => {
                solution.nodes = nodes;
                Ok(solution)
            }
            None => Err(SolverError::NoIntegerSolution),
        }
    }
}

/// First basic row whose variable must be integral but is not.
fn fractional_variable(solution: &Solution, n: usize, integer: &[bool]) -> Result<Option<Branch>> {
    let tableau = &solution.tableau;
    let loc = locate_basis(&tableau.x, &tableau.basis)?;
    Ok(loc
        .iter()
        .zip(&tableau.b)
        .find(|&(&col, &value)| col < n && integer[col] && !is_integer(value))
        .map(|(&column, &value)| Branch { column, value }))
}

fn assignment(tableau: &Tableau, n: usize) -> BTreeMap<String, f64> {
    tableau
        .values()
        .into_iter()
        .take(n)
        .map(|(name, value)| (name, correct(value)))
        .collect()
}
