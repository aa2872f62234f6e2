use log::{debug, info};

use crate::algebra::Matrix;
use crate::basis::{compute_reduced_costs, locate_basis, ReducedCosts};
use crate::error::{Result, SolverError};
use crate::oracle::classify;
use crate::pivot::{self, Selection};
use crate::rational::{is_positive, is_zero};
use crate::sensitivity::{Revision, SensitivityRequest, Snapshot};
use crate::solution::{AlternateOptimum, Analysis, PivotStep, Solution, SolutionStatus};
use crate::tableau::Tableau;

/// Full-tableau simplex solver
pub struct Solver {
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Consecutive degenerate pivots after which Bland's rule takes over
    degenerate_streak_limit: usize,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            degenerate_streak_limit: 8,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_degenerate_streak_limit(mut self, limit: usize) -> Self {
        self.degenerate_streak_limit = limit;
        self
    }

    /// Solve a canonical tableau from scratch
    pub fn solve(&self, tableau: &Tableau) -> Result<Solution> {
        self.run(tableau.clone(), tableau.a.clone())
    }

    /// Continue from a tableau produced by a post-optimal update
    pub fn resolve(&self, revision: &Revision) -> Result<Solution> {
        self.run(revision.tableau.clone(), revision.initial_a.clone())
    }

    /// Apply a post-optimal change to a snapshot and re-optimise
    pub fn update(&self, snapshot: &Snapshot, request: &SensitivityRequest) -> Result<Solution> {
        let revision = snapshot.apply(request)?;
        self.resolve(&revision)
    }

    fn run(&self, mut tableau: Tableau, initial_a: Matrix) -> Result<Solution> {
        tableau.validate()?;
        locate_basis(&tableau.x, &tableau.basis)?;

        let mut steps: Vec<PivotStep> = Vec::new();
        let mut degenerate_streak = 0;

        loop {
            let reduced_costs = compute_reduced_costs(&tableau)?;
            let state = classify(&tableau.b, &reduced_costs.zc);

            if state.optimal {
                info!(
                    "optimal after {} pivots, objective {}",
                    steps.len(),
                    reduced_costs.objective()
                );
                return Ok(self.finish(tableau, reduced_costs, steps, initial_a));
            }

            let selection = match state.min_rhs_index {
                Some(row) => pivot::select_infeasible(&tableau, &reduced_costs.zc, row),
                None if degenerate_streak >= self.degenerate_streak_limit => {
                    let loc = locate_basis(&tableau.x, &tableau.basis)?;
                    pivot::select_bland(&tableau, &reduced_costs.zc, &loc)
                }
                None => pivot::select_optimal(&tableau, &reduced_costs.zc),
            };

            let status = match selection {
                Selection::Pivot(p) => {
                    if steps.len() >= self.max_iterations {
                        return Err(SolverError::IterationLimit {
                            limit: self.max_iterations,
                        });
                    }
                    degenerate_streak = if p.is_degenerate() { degenerate_streak + 1 } else { 0 };

                    let step = PivotStep::new(&tableau, &p);
                    debug!(
                        "pivot {:?}: {} enters, {} leaves (row {}, column {}, element {})",
                        step.rule, step.entering, step.leaving, step.row, step.column, step.element
                    );
                    steps.push(step);
                    tableau = pivot::apply(tableau, &p);
                    continue;
                }
                Selection::Unbounded { column } => SolutionStatus::Unbounded {
                    column,
                    variable: tableau.x[column].clone(),
                },
                Selection::PermanentlyInfeasible { row } => SolutionStatus::Infeasible {
                    row,
                    variable: tableau.basis[row].clone(),
                },
            };

            info!("halted after {} pivots: {:?}", steps.len(), status);
            return Ok(Solution {
                status,
                tableau,
                reduced_costs,
                steps,
                alternates: Vec::new(),
                degenerate: Vec::new(),
                analysis: Analysis::empty(),
                initial_a,
            });
        }
    }

    fn finish(
        &self,
        tableau: Tableau,
        reduced_costs: ReducedCosts,
        steps: Vec<PivotStep>,
        initial_a: Matrix,
    ) -> Solution {
        let alternates = alternate_optima(&tableau, &reduced_costs);
        if !alternates.is_empty() {
            debug!("{} alternate optima", alternates.len());
        }

        let degenerate = tableau
            .basis
            .iter()
            .zip(&tableau.b)
            .filter(|(_, b)| is_zero(**b))
            .map(|(name, _)| name.clone())
            .collect();

        let analysis = Analysis::of(&tableau, &reduced_costs);

        Solution {
            status: SolutionStatus::Optimal,
            tableau,
            reduced_costs,
            steps,
            alternates,
            degenerate,
            analysis,
            initial_a,
        }
    }
}

/// Optimal vertices one pivot away: non-basic columns with a zero reduced
/// cost and a positive entry. Each is explored on a copy of the tableau.
fn alternate_optima(tableau: &Tableau, reduced_costs: &ReducedCosts) -> Vec<AlternateOptimum> {
    (0..tableau.cols())
        .filter(|&j| !tableau.is_basic(&tableau.x[j]) && is_zero(reduced_costs.zc[j]))
        .filter(|&j| tableau.a.iter().any(|row| is_positive(row[j])))
        .filter_map(|j| match pivot::enter(tableau, j) {
            Selection::Pivot(p) => Some(AlternateOptimum {
                entering: tableau.x[j].clone(),
                leaving: tableau.basis[p.row].clone(),
                tableau: pivot::apply(tableau.clone(), &p),
            }),
            _ => None,
        })
        .collect()
}
