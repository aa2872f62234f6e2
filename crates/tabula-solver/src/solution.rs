use crate::algebra::Matrix;
use crate::basis::ReducedCosts;
use crate::error::{Result, SolverError};
use crate::pivot::{Pivot, PivotRule};
use crate::rational::is_zero;
use crate::sensitivity::Snapshot;
use crate::tableau::Tableau;

/// The result of running the simplex engine on a tableau
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Tableau in the state the engine halted in
    pub tableau: Tableau,
    /// Reduced costs of the final tableau
    pub reduced_costs: ReducedCosts,
    /// Every pivot performed, in order
    pub steps: Vec<PivotStep>,
    /// Other optimal vertices reachable in one pivot (optimal only)
    pub alternates: Vec<AlternateOptimum>,
    /// Basic variables sitting at zero (optimal only)
    pub degenerate: Vec<String>,
    /// Post-optimal analysis (optimal only)
    pub analysis: Analysis,
    /// Raw constraint matrix the tableau was derived from
    pub initial_a: Matrix,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The entering column has no positive entry
    Unbounded { column: usize, variable: String },
    /// The infeasible row has no negative entry to pivot on
    Infeasible { row: usize, variable: String },
}

/// One pivot performed by the engine
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PivotStep {
    pub rule: PivotRule,
    pub row: usize,
    pub column: usize,
    pub element: f64,
    /// Variable entering the basis
    pub entering: String,
    /// Variable leaving the basis
    pub leaving: String,
    pub ratios: Vec<f64>,
}

impl PivotStep {
    pub(crate) fn new(tableau: &Tableau, pivot: &Pivot) -> Self {
        Self {
            rule: pivot.rule,
            row: pivot.row,
            column: pivot.column,
            element: pivot.element,
            entering: tableau.x[pivot.column].clone(),
            leaving: tableau.basis[pivot.row].clone(),
            ratios: pivot.ratios.clone(),
        }
    }
}

/// A second optimal vertex, reached by pivoting a zero reduced-cost column
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateOptimum {
    pub entering: String,
    pub leaving: String,
    /// Tableau at the alternate vertex
    pub tableau: Tableau,
}

/// Detailed analysis of the optimal solution
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Shadow prices (dual values), one per slack column
    /// Indicates how much the objective would change per unit of RHS
    pub shadow_prices: Vec<ShadowPrice>,

    /// Reduced costs for each structural variable
    pub reduced_costs: Vec<ReducedCost>,

    /// Slack variables at zero, i.e. constraints that are tight
    pub binding_constraints: Vec<String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPrice {
    /// Row the slack variable was created for
    pub row: usize,
    /// Slack variable name
    pub slack: String,
    /// Shadow price value
    pub value: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedCost {
    /// Variable name
    pub variable: String,
    /// Current value in solution
    pub value: f64,
    /// Reduced cost
    pub reduced_cost: f64,
    /// Is this variable in the basis?
    pub is_basic: bool,
}

impl Solution {
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    /// Objective value of the final tableau (maximisation sense).
    pub fn objective(&self) -> f64 {
        self.reduced_costs.objective()
    }

    /// Value of every variable, structural and slack.
    pub fn values(&self) -> Vec<(String, f64)> {
        self.tableau.values()
    }

    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.tableau.value_of(name)
    }

    /// Number of pivots the engine performed.
    pub fn pivots(&self) -> usize {
        self.steps.len()
    }

    /// Capture the snapshot that post-optimal updates start from.
    pub fn snapshot(&self) -> Result<Snapshot> {
        if !self.is_optimal() {
            return Err(SolverError::NotOptimal);
        }
        Snapshot::capture(self.tableau.clone(), self.initial_a.clone())
    }
}

impl Analysis {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn of(tableau: &Tableau, reduced_costs: &ReducedCosts) -> Self {
        let n = tableau.structural();
        let values = tableau.values();

        let shadow_prices = (n..tableau.cols())
            .map(|j| ShadowPrice {
                row: j - n,
                slack: tableau.x[j].clone(),
                value: reduced_costs.zc[j],
            })
            .collect();

        let reduced_costs = (0..n)
            .map(|j| ReducedCost {
                variable: tableau.x[j].clone(),
                value: values[j].1,
                reduced_cost: reduced_costs.zc[j],
                is_basic: tableau.is_basic(&tableau.x[j]),
            })
            .collect();

        let binding_constraints = values[n..]
            .iter()
            .filter(|(_, value)| is_zero(*value))
            .map(|(name, _)| name.clone())
            .collect();

        Self {
            shadow_prices,
            reduced_costs,
            binding_constraints,
        }
    }
}
