//! Dense matrix helpers used by the tableau engine.

use crate::error::{Result, SolverError};

/// Row-major dense matrix.
pub type Matrix = Vec<Vec<f64>>;

pub fn transpose(matrix: &[Vec<f64>]) -> Matrix {
    let cols = matrix.first().map_or(0, Vec::len);
    (0..cols)
        .map(|j| matrix.iter().map(|row| row[j]).collect())
        .collect()
}

/// Matrix-vector product `M · v`.
pub fn mat_vec(matrix: &[Vec<f64>], vector: &[f64]) -> Result<Vec<f64>> {
    let mut product = Vec::with_capacity(matrix.len());
    for row in matrix {
        if row.len() != vector.len() {
            return Err(SolverError::DimensionMismatch {
                what: "matrix-vector product",
                expected: row.len(),
                found: vector.len(),
            });
        }
        product.push(row.iter().zip(vector).map(|(a, b)| a * b).sum());
    }
    Ok(product)
}

/// Matrix-matrix product `M · N`.
pub fn mat_mul(left: &[Vec<f64>], right: &[Vec<f64>]) -> Result<Matrix> {
    let inner = right.len();
    let cols = right.first().map_or(0, Vec::len);
    if let Some(row) = right.iter().find(|row| row.len() != cols) {
        return Err(SolverError::DimensionMismatch {
            what: "matrix product columns",
            expected: cols,
            found: row.len(),
        });
    }

    let mut product = vec![vec![0.0; cols]; left.len()];
    for (i, row) in left.iter().enumerate() {
        if row.len() != inner {
            return Err(SolverError::DimensionMismatch {
                what: "matrix product",
                expected: row.len(),
                found: inner,
            });
        }
        for (k, &a) in row.iter().enumerate() {
            for j in 0..cols {
                product[i][j] += a * right[k][j];
            }
        }
    }
    Ok(product)
}

/// The `m × m` block of a solved tableau sitting under the slack columns
/// `[n, n + m)`, where `n = cols(A) - m`.
///
/// This block is the image of the initial identity under every row
/// operation applied so far, i.e. the inverse of the current basis.
pub fn extract_basis_inverse(a: &[Vec<f64>]) -> Result<Matrix> {
    let m = a.len();
    let cols = a.first().map_or(0, Vec::len);
    if cols < m {
        return Err(SolverError::DimensionMismatch {
            what: "basis inverse columns",
            expected: m,
            found: cols,
        });
    }
    let n = cols - m;
    Ok(a.iter().map(|row| row[n..n + m].to_vec()).collect())
}

/// `target[j] -= multiplier * pivot_row[j]` for every `j`.
pub fn eliminate(target: &mut [f64], pivot_row: &[f64], multiplier: f64) {
    for (t, p) in target.iter_mut().zip(pivot_row) {
        *t -= multiplier * p;
    }
}

/// Column `j` of a matrix.
pub fn column(matrix: &[Vec<f64>], j: usize) -> Vec<f64> {
    matrix.iter().map(|row| row[j]).collect()
}
