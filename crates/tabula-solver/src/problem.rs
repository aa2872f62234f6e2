use crate::error::{Result, SolverError};
use crate::sensitivity::SensitivityRequest;
use crate::tableau::Tableau;

/// Represents a linear program over non-negative variables
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective function coefficients
    pub objective: Objective,
    /// Constraints
    pub constraints: Vec<Constraint>,
    /// Integrality flag per variable; missing entries are continuous
    #[cfg_attr(feature = "serde", serde(default))]
    pub integer: Vec<bool>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub minimize: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl LpProblem {
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
                minimize: false,
            },
            constraints: Vec::new(),
            integer: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>, minimize: bool) {
        self.objective = Objective { coefficients, minimize };
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            op,
            rhs,
        });
    }

    /// Mark variable `variable` as integer-required (or continuous).
    pub fn set_integer(&mut self, variable: usize, integer: bool) {
        if self.integer.len() <= variable {
            self.integer.resize(variable + 1, false);
        }
        self.integer[variable] = integer;
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Integrality flags padded to one per variable.
    pub fn integer_requirements(&self) -> Vec<bool> {
        let mut flags = self.integer.clone();
        flags.resize(self.num_variables(), false);
        flags
    }

    /// Constraint name of every tableau row; `=` constraints span two rows.
    pub fn row_labels(&self) -> Vec<String> {
        self.constraints
            .iter()
            .flat_map(|constraint| {
                let rows = if constraint.op == ConstraintOp::Eq { 2 } else { 1 };
                std::iter::repeat_n(constraint.name.clone(), rows)
            })
            .collect()
    }

    /// Objective value in the problem's own sense, given the tableau's
    /// maximisation value.
    pub fn objective_value(&self, z: f64) -> f64 {
        if self.objective.minimize { -z } else { z }
    }

    /// Express the costs of a post-optimal request in the tableau's
    /// maximisation sense, negating them for a minimisation problem.
    ///
    /// Coefficients and RHS values are already in tableau coordinates and
    /// pass through unchanged.
    pub fn to_tableau_request(&self, request: SensitivityRequest) -> SensitivityRequest {
        if !self.objective.minimize {
            return request;
        }
        let negate = |costs: Vec<f64>| costs.into_iter().map(|v| -v).collect::<Vec<_>>();
        match request {
            SensitivityRequest::ObjectiveChange { c } => SensitivityRequest::ObjectiveChange { c: negate(c) },
            SensitivityRequest::NewConstraints { rows, rhs, costs } => SensitivityRequest::NewConstraints {
                rows,
                rhs,
                costs: costs.map(negate),
            },
            SensitivityRequest::NewVariables { columns, costs, names } => SensitivityRequest::NewVariables {
                columns,
                costs: negate(costs),
                names,
            },
            other => other,
        }
    }

    /// Build the canonical maximisation tableau with a slack per row.
    ///
    /// `>=` rows are negated into `<=` rows with a negative RHS and `=` rows
    /// become a `<=` and `>=` pair; the engine repairs negative RHS values
    /// before optimising.
    pub fn to_tableau(&self) -> Result<Tableau> {
        let n = self.num_variables();
        if self.objective.coefficients.len() != n {
            return Err(SolverError::DimensionMismatch {
                what: "objective coefficients",
                expected: n,
                found: self.objective.coefficients.len(),
            });
        }

        let mut rows: Vec<(Vec<f64>, f64)> = Vec::new();
        for constraint in &self.constraints {
            if constraint.coefficients.len() != n {
                return Err(SolverError::DimensionMismatch {
                    what: "constraint coefficients",
                    expected: n,
                    found: constraint.coefficients.len(),
                });
            }
            let negated = || constraint.coefficients.iter().map(|v| -v).collect::<Vec<_>>();
            match constraint.op {
                ConstraintOp::Le => rows.push((constraint.coefficients.clone(), constraint.rhs)),
                ConstraintOp::Ge => rows.push((negated(), -constraint.rhs)),
                ConstraintOp::Eq => {
                    rows.push((constraint.coefficients.clone(), constraint.rhs));
                    rows.push((negated(), -constraint.rhs));
                }
            }
        }

        let m = rows.len();
        let mut slacks: Vec<String> = Vec::with_capacity(m);
        for _ in 0..m {
            let name = (1..)
                .map(|k| format!("s{k}"))
                .find(|name| !self.variables.contains(name) && !slacks.contains(name))
                .unwrap_or_default();
            slacks.push(name);
        }

        let (a, b): (Vec<Vec<f64>>, Vec<f64>) = rows
            .into_iter()
            .enumerate()
            .map(|(i, (mut coefficients, rhs))| {
                coefficients.extend((0..m).map(|j| if i == j { 1.0 } else { 0.0 }));
                (coefficients, rhs)
            })
            .unzip();

        let sign = if self.objective.minimize { -1.0 } else { 1.0 };
        let mut c: Vec<f64> = self.objective.coefficients.iter().map(|v| sign * v).collect();
        c.resize(n + m, 0.0);

        let mut x = self.variables.clone();
        x.extend(slacks.iter().cloned());

        Tableau::new(a, b, c, x, slacks)
    }
}
