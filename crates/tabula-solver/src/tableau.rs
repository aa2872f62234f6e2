use crate::algebra::Matrix;
use crate::error::{Result, SolverError};

/// A canonical-form simplex tableau for a maximisation problem.
///
/// `a` is `m × (n + m)`: `n` structural columns followed by one slack
/// column per constraint. `basis[i]` names the variable whose column is the
/// unit vector `e_i`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    /// Constraint coefficients
    pub a: Matrix,
    /// Right-hand side, one entry per row
    pub b: Vec<f64>,
    /// Objective coefficients, one per column
    pub c: Vec<f64>,
    /// All variable names, structural first, slack last
    pub x: Vec<String>,
    /// Basic variable of each row
    pub basis: Vec<String>,
}

impl Tableau {
    /// Build a tableau, rejecting inconsistent dimensions.
    pub fn new(a: Matrix, b: Vec<f64>, c: Vec<f64>, x: Vec<String>, basis: Vec<String>) -> Result<Self> {
        let tableau = Self { a, b, c, x, basis };
        tableau.validate()?;
        Ok(tableau)
    }

    /// Check the shape invariants between `a`, `b`, `c`, `x` and `basis`.
    pub fn validate(&self) -> Result<()> {
        let m = self.a.len();
        check("rows of b", m, self.b.len())?;
        check("basis length", m, self.basis.len())?;

        let cols = self.x.len();
        for row in &self.a {
            check("columns of A", cols, row.len())?;
        }
        check("objective length", cols, self.c.len())?;
        if cols < m {
            return Err(SolverError::DimensionMismatch {
                what: "slack columns",
                expected: m,
                found: cols,
            });
        }

        for (i, name) in self.x.iter().enumerate() {
            if self.x[..i].contains(name) {
                return Err(SolverError::DuplicateVariable { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Number of constraint rows.
    pub fn rows(&self) -> usize {
        self.a.len()
    }

    /// Number of columns (structural plus slack).
    pub fn cols(&self) -> usize {
        self.x.len()
    }

    /// Number of structural columns preceding the slack block.
    pub fn structural(&self) -> usize {
        self.cols() - self.rows()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.x.iter().position(|v| v == name)
    }

    pub fn is_basic(&self, name: &str) -> bool {
        self.basis.iter().any(|v| v == name)
    }

    /// The first `s<k>` label not already used by a variable.
    pub fn fresh_slack_name(&self, taken: &[String]) -> String {
        (1..)
            .map(|k| format!("s{k}"))
            .find(|name| !self.x.contains(name) && !taken.contains(name))
            .unwrap_or_default()
    }

    /// Value of every variable at the current basic solution.
    pub fn values(&self) -> Vec<(String, f64)> {
        self.x
            .iter()
            .map(|name| {
                let value = self
                    .basis
                    .iter()
                    .position(|v| v == name)
                    .map_or(0.0, |row| self.b[row]);
                (name.clone(), value)
            })
            .collect()
    }

    /// Value of a single variable at the current basic solution.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.index_of(name)?;
        Some(
            self.basis
                .iter()
                .position(|v| v == name)
                .map_or(0.0, |row| self.b[row]),
        )
    }
}

fn check(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(SolverError::DimensionMismatch { what, expected, found });
    }
    Ok(())
}
