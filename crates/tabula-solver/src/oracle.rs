use crate::rational::correct;

/// Feasibility and optimality of a tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Row holding the most negative RHS entry, when infeasible
    pub min_rhs_index: Option<usize>,
    pub feasible: bool,
    pub optimal: bool,
}

/// Classify a tableau from its RHS column and `z - c` row.
///
/// Optimality is only evaluated for a feasible tableau.
pub fn classify(b: &[f64], zc: &[f64]) -> Classification {
    let mut min_rhs_index = None;
    let mut min_value = 0.0;
    for (i, &value) in b.iter().enumerate() {
        let value = correct(value);
        if value < min_value {
            min_value = value;
            min_rhs_index = Some(i);
        }
    }

    let feasible = min_rhs_index.is_none();
    let optimal = feasible && zc.iter().all(|&v| correct(v) >= 0.0);

    Classification {
        min_rhs_index,
        feasible,
        optimal,
    }
}
