use crate::error::{Result, SolverError};
use crate::tableau::Tableau;

/// Reduced-cost rows of a tableau.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedCosts {
    /// Objective coefficient of each row's basic variable
    pub cb: Vec<f64>,
    /// `z[j] = Σ cB[i]·A[i][j]`, with the objective value appended
    pub z: Vec<f64>,
    /// `zc[j] = z[j] - c[j]`
    pub zc: Vec<f64>,
}

impl ReducedCosts {
    /// Current objective value, the last entry of `z`.
    pub fn objective(&self) -> f64 {
        self.z.last().copied().unwrap_or(0.0)
    }
}

/// Column index in `x` of every basic variable.
pub fn locate_basis(x: &[String], basis: &[String]) -> Result<Vec<usize>> {
    basis
        .iter()
        .map(|name| {
            x.iter()
                .position(|v| v == name)
                .ok_or_else(|| SolverError::InconsistentBasis { variable: name.clone() })
        })
        .collect()
}

/// Compute `cB`, `z` and `z - c` for the tableau's current basis.
pub fn compute_reduced_costs(tableau: &Tableau) -> Result<ReducedCosts> {
    let m = tableau.rows();
    let cols = tableau.c.len();
    if m != tableau.basis.len() {
        return Err(SolverError::DimensionMismatch {
            what: "basis length",
            expected: m,
            found: tableau.basis.len(),
        });
    }
    if let Some(row) = tableau.a.iter().find(|row| row.len() != cols) {
        return Err(SolverError::DimensionMismatch {
            what: "columns of A",
            expected: cols,
            found: row.len(),
        });
    }

    let loc = locate_basis(&tableau.x, &tableau.basis)?;
    let cb: Vec<f64> = loc.iter().map(|&j| tableau.c[j]).collect();

    let mut z = vec![0.0; cols + 1];
    for (i, row) in tableau.a.iter().enumerate() {
        for (j, &a) in row.iter().enumerate() {
            z[j] += cb[i] * a;
        }
        z[cols] += cb[i] * tableau.b[i];
    }
    let zc = (0..cols).map(|j| z[j] - tableau.c[j]).collect();

    Ok(ReducedCosts { cb, z, zc })
}
