//! Pivot selection and the row operation that applies a pivot.

use crate::algebra::{column, eliminate};
use crate::rational::{correct, is_negative, is_positive};
use crate::tableau::Tableau;

/// Rule that chose a pivot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotRule {
    /// Dual-style pivot on the most negative RHS row
    Infeasibility,
    /// Most negative reduced cost, minimum ratio
    Dantzig,
    /// Lowest-index entering and leaving variables, used to break cycling
    Bland,
}

/// A chosen pivot, consumed by [`apply`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub rule: PivotRule,
    pub row: usize,
    pub column: usize,
    pub element: f64,
    /// Pivot column before the row operation
    pub column_vector: Vec<f64>,
    /// Ratio per row (optimality pivots) or per column (infeasibility
    /// pivots); ineligible entries are `+∞`
    pub ratios: Vec<f64>,
}

impl Pivot {
    /// Whether this pivot leaves the objective unchanged.
    pub fn is_degenerate(&self) -> bool {
        self.rule != PivotRule::Infeasibility && correct(self.ratios[self.row]) == 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Pivot(Pivot),
    /// No positive entry in the entering column
    Unbounded { column: usize },
    /// No negative entry in the infeasible row
    PermanentlyInfeasible { row: usize },
}

/// Pivot on the infeasible row `row`: among its negative entries pick the
/// column minimising `|zc[j] / A[row][j]|`.
pub fn select_infeasible(tableau: &Tableau, zc: &[f64], row: usize) -> Selection {
    let pivot_row = &tableau.a[row];
    let ratios: Vec<f64> = pivot_row
        .iter()
        .zip(zc)
        .map(|(&a, &z)| if is_negative(a) { (z / a).abs() } else { f64::INFINITY })
        .collect();

    let Some(col) = argmin(&ratios, |r| r.is_finite()) else {
        return Selection::PermanentlyInfeasible { row };
    };

    Selection::Pivot(Pivot {
        rule: PivotRule::Infeasibility,
        row,
        column: col,
        element: pivot_row[col],
        column_vector: column(&tableau.a, col),
        ratios,
    })
}

/// Standard optimality pivot: most negative `zc[j]`, then the minimum ratio
/// test with ties resolved to the first row.
pub fn select_optimal(tableau: &Tableau, zc: &[f64]) -> Selection {
    let Some(col) = argmin(zc, |_| true) else {
        return Selection::Unbounded { column: 0 };
    };
    ratio_test(tableau, col, PivotRule::Dantzig, None)
}

/// Bland's rule: first column with a negative reduced cost enters; among
/// tied ratios the basic variable with the lowest column index leaves.
///
/// `loc[i]` is the column of row `i`'s basic variable.
pub fn select_bland(tableau: &Tableau, zc: &[f64], loc: &[usize]) -> Selection {
    let Some(col) = zc.iter().position(|&v| is_negative(v)) else {
        return Selection::Unbounded { column: 0 };
    };
    ratio_test(tableau, col, PivotRule::Bland, Some(loc))
}

/// Minimum ratio test for a caller-chosen entering column.
pub fn enter(tableau: &Tableau, col: usize) -> Selection {
    ratio_test(tableau, col, PivotRule::Dantzig, None)
}

fn ratio_test(tableau: &Tableau, col: usize, rule: PivotRule, loc: Option<&[usize]>) -> Selection {
    let column_vector = column(&tableau.a, col);
    let ratios: Vec<f64> = column_vector
        .iter()
        .zip(&tableau.b)
        .map(|(&a, &b)| if is_positive(a) { correct(b) / a } else { f64::INFINITY })
        .collect();

    let mut best: Option<usize> = None;
    for (i, &ratio) in ratios.iter().enumerate() {
        if !ratio.is_finite() || ratio < 0.0 {
            continue;
        }
        best = match best {
            None => Some(i),
            Some(current) => {
                let (r, c) = (correct(ratio), correct(ratios[current]));
                let wins = match loc {
                    Some(loc) => r < c || (r == c && loc[i] < loc[current]),
                    None => r < c,
                };
                if wins { Some(i) } else { Some(current) }
            }
        };
    }

    let Some(row) = best else {
        return Selection::Unbounded { column: col };
    };

    Selection::Pivot(Pivot {
        rule,
        row,
        column: col,
        element: column_vector[row],
        column_vector,
        ratios,
    })
}

/// Index of the smallest eligible value, first occurrence on ties.
fn argmin(values: &[f64], eligible: impl Fn(f64) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if !eligible(v) {
            continue;
        }
        let v = correct(v);
        if best.is_none_or(|(_, b)| v < b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Apply a pivot: normalise the pivot row, eliminate the pivot column from
/// every other row (and from `b`), and swap the basic variable.
pub fn apply(mut tableau: Tableau, pivot: &Pivot) -> Tableau {
    let (row, col) = (pivot.row, pivot.column);

    for value in tableau.a[row].iter_mut() {
        *value /= pivot.element;
    }
    tableau.b[row] /= pivot.element;
    tableau.a[row][col] = 1.0;

    let pivot_row = tableau.a[row].clone();
    let pivot_rhs = tableau.b[row];
    for i in 0..tableau.rows() {
        let multiplier = pivot.column_vector[i];
        if i == row || multiplier == 0.0 {
            continue;
        }
        eliminate(&mut tableau.a[i], &pivot_row, multiplier);
        tableau.b[i] -= multiplier * pivot_rhs;
        tableau.a[i][col] = 0.0;
    }

    tableau.basis[row] = tableau.x[col].clone();
    tableau
}
