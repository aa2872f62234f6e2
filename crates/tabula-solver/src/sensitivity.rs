//! Post-optimal updates of a solved tableau.
//!
//! Every update maps raw data into the coordinates of the solved basis with
//! the basis inverse `V` (`t_final = V · t_raw`) instead of re-solving. The
//! snapshot itself is never modified; each update returns a [`Revision`]
//! that [`crate::Solver::resolve`] re-optimises if the change broke
//! feasibility or optimality.

use log::debug;

use crate::algebra::{column, eliminate, extract_basis_inverse, mat_mul, mat_vec, transpose, Matrix};
use crate::basis::locate_basis;
use crate::error::{Result, SolverError};
use crate::tableau::Tableau;

/// A post-optimal change request
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum SensitivityRequest {
    /// Replace the objective coefficients of every column
    ObjectiveChange { c: Vec<f64> },
    /// Replace the raw right-hand side
    RhsChange { b: Vec<f64> },
    /// Append raw constraint rows, each ending in its own slack column
    NewConstraints {
        rows: Matrix,
        rhs: Vec<f64>,
        #[cfg_attr(feature = "serde", serde(default))]
        costs: Option<Vec<f64>>,
    },
    /// Insert raw columns (`m × k`) before the slack block
    NewVariables {
        columns: Matrix,
        costs: Vec<f64>,
        names: Vec<String>,
    },
    /// Replace the raw constraint matrix
    CoefficientChange { a: Matrix },
}

/// State captured from an optimal solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Optimal tableau
    pub tableau: Tableau,
    /// Basis inverse `V`, the block under the slack columns
    pub basis_inverse: Matrix,
    /// Raw constraint matrix in the tableau's column layout
    pub initial_a: Matrix,
}

/// An updated tableau, ready to be handed back to the engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub tableau: Tableau,
    pub initial_a: Matrix,
}

impl Snapshot {
    /// Capture an optimal tableau together with the raw matrix it was
    /// derived from.
    ///
    /// The basis inverse is read off the slack block, so the raw matrix
    /// must hold the identity there.
    pub fn capture(tableau: Tableau, initial_a: Matrix) -> Result<Self> {
        tableau.validate()?;
        expect_len("rows of initial A", tableau.rows(), initial_a.len())?;
        for row in &initial_a {
            expect_len("columns of initial A", tableau.cols(), row.len())?;
        }
        let n = tableau.structural();
        for j in n..tableau.cols() {
            if !is_unit(&column(&initial_a, j), j - n) {
                return Err(SolverError::SlackColumnChanged {
                    variable: tableau.x[j].clone(),
                    column: j,
                });
            }
        }

        let basis_inverse = extract_basis_inverse(&tableau.a)?;
        Ok(Self {
            tableau,
            basis_inverse,
            initial_a,
        })
    }

    pub fn apply(&self, request: &SensitivityRequest) -> Result<Revision> {
        match request {
            SensitivityRequest::ObjectiveChange { c } => self.change_objective(c),
            SensitivityRequest::RhsChange { b } => self.change_rhs(b),
            SensitivityRequest::NewConstraints { rows, rhs, costs } => {
                self.add_constraints(rows, rhs, costs.as_deref())
            }
            SensitivityRequest::NewVariables {
                columns,
                costs,
                names,
            } => self.add_variables(columns, costs, names),
            SensitivityRequest::CoefficientChange { a } => self.change_coefficients(a),
        }
    }

    fn revision(&self, tableau: Tableau) -> Revision {
        Revision {
            tableau,
            initial_a: self.initial_a.clone(),
        }
    }

    /// New objective coefficients; basis and RHS are unchanged.
    pub fn change_objective(&self, c: &[f64]) -> Result<Revision> {
        expect_len("objective length", self.tableau.cols(), c.len())?;
        debug!("objective coefficients changed");

        let mut tableau = self.tableau.clone();
        tableau.c = c.to_vec();
        Ok(self.revision(tableau))
    }

    /// New raw RHS `b₀`, mapped with `b = V · b₀`.
    pub fn change_rhs(&self, b: &[f64]) -> Result<Revision> {
        expect_len("rows of b", self.tableau.rows(), b.len())?;
        debug!("resource values changed");

        let mut tableau = self.tableau.clone();
        tableau.b = mat_vec(&self.basis_inverse, b)?;
        Ok(self.revision(tableau))
    }

    /// Append raw constraint rows.
    ///
    /// Each row spans the current columns plus one slack column per new row.
    /// Existing slack columns must read zero and the new slack block must be
    /// the identity. Rows are folded into the
    /// current basis so that every basic column reads zero, then their
    /// slacks join the basis.
    pub fn add_constraints(&self, rows: &[Vec<f64>], rhs: &[f64], costs: Option<&[f64]>) -> Result<Revision> {
        let k = rows.len();
        let cols = self.tableau.cols();
        expect_len("rows of new b", k, rhs.len())?;
        if let Some(costs) = costs {
            expect_len("new slack costs", k, costs.len())?;
        }
        let n = self.tableau.structural();
        for (i, row) in rows.iter().enumerate() {
            expect_len("columns of new row", cols + k, row.len())?;
            let unit = row[n..cols].iter().all(|&v| v == 0.0) && is_unit(&row[cols..], i);
            if !unit {
                return Err(SolverError::NonUnitSlack { row: i });
            }
        }

        let loc = locate_basis(&self.tableau.x, &self.tableau.basis)?;
        let mut tableau = self.tableau.clone();
        let mut initial_a = self.initial_a.clone();
        for row in tableau.a.iter_mut().chain(initial_a.iter_mut()) {
            row.resize(cols + k, 0.0);
        }

        let mut slack_names: Vec<String> = Vec::with_capacity(k);
        for (i, raw) in rows.iter().enumerate() {
            let mut row = raw.clone();
            let mut value = rhs[i];
            for (r, &basic_col) in loc.iter().enumerate() {
                let multiplier = row[basic_col];
                if multiplier != 0.0 {
                    eliminate(&mut row, &tableau.a[r], multiplier);
                    value -= multiplier * tableau.b[r];
                }
            }

            let name = tableau.fresh_slack_name(&slack_names);
            slack_names.push(name);
            tableau.a.push(row);
            tableau.b.push(value);
            initial_a.push(raw.clone());
        }

        for (i, name) in slack_names.into_iter().enumerate() {
            tableau.c.push(costs.map_or(0.0, |costs| costs[i]));
            tableau.x.push(name.clone());
            tableau.basis.push(name);
        }
        debug!("added {} constraints", k);

        Ok(Revision { tableau, initial_a })
    }

    /// Insert raw columns (`m × k`) before the slack block, mapped with
    /// `t = V · t₀`.
    pub fn add_variables(&self, columns: &[Vec<f64>], costs: &[f64], names: &[String]) -> Result<Revision> {
        let m = self.tableau.rows();
        let k = names.len();
        expect_len("rows of new columns", m, columns.len())?;
        expect_len("new variable costs", k, costs.len())?;
        for row in columns {
            expect_len("new columns", k, row.len())?;
        }
        for (i, name) in names.iter().enumerate() {
            if self.tableau.x.contains(name) || names[..i].contains(name) {
                return Err(SolverError::DuplicateVariable { name: name.clone() });
            }
        }

        let transformed = mat_mul(&self.basis_inverse, columns)?;
        let n = self.tableau.structural();

        let mut tableau = self.tableau.clone();
        let mut initial_a = self.initial_a.clone();
        for i in 0..m {
            tableau.a[i].splice(n..n, transformed[i].iter().copied());
            initial_a[i].splice(n..n, columns[i].iter().copied());
        }
        tableau.c.splice(n..n, costs.iter().copied());
        tableau.x.splice(n..n, names.iter().cloned());
        debug!("added {} variables", k);

        Ok(Revision { tableau, initial_a })
    }

    /// Replace the raw constraint matrix.
    ///
    /// Non-basic structural columns are remapped with `V`. Columns of basic
    /// variables must be unchanged, and the slack block must stay the
    /// identity, since the basis inverse was built from them.
    pub fn change_coefficients(&self, a: &[Vec<f64>]) -> Result<Revision> {
        let cols = self.tableau.cols();
        expect_len("rows of A", self.tableau.rows(), a.len())?;
        for row in a {
            expect_len("columns of A", cols, row.len())?;
        }

        let loc = locate_basis(&self.tableau.x, &self.tableau.basis)?;
        let n = self.tableau.structural();
        let mut final_columns = transpose(&self.tableau.a);
        for j in 0..cols {
            let raw = column(a, j);
            if j >= n {
                if !is_unit(&raw, j - n) {
                    return Err(SolverError::SlackColumnChanged {
                        variable: self.tableau.x[j].clone(),
                        column: j,
                    });
                }
            } else if loc.contains(&j) {
                let unchanged = raw
                    .iter()
                    .zip(self.initial_a.iter().map(|row| row[j]))
                    .all(|(new, old)| new.to_bits() == old.to_bits());
                if !unchanged {
                    return Err(SolverError::BasisCoefficientChanged {
                        variable: self.tableau.x[j].clone(),
                        column: j,
                    });
                }
            } else {
                final_columns[j] = mat_vec(&self.basis_inverse, &raw)?;
            }
        }
        debug!("constraint coefficients changed");

        let mut tableau = self.tableau.clone();
        if !final_columns.is_empty() {
            tableau.a = transpose(&final_columns);
        }
        Ok(Revision {
            tableau,
            initial_a: a.to_vec(),
        })
    }
}

/// Whether `values` is the unit vector `e_index`.
fn is_unit(values: &[f64], index: usize) -> bool {
    values
        .iter()
        .enumerate()
        .all(|(i, &v)| v == if i == index { 1.0 } else { 0.0 })
}

fn expect_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(SolverError::DimensionMismatch { what, expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::Solver;
    use crate::solution::{Solution, SolutionStatus};
    use crate::tableau::fixtures::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{} (expected {})",
            actual,
            expected
        );
    }

    fn solved_textbook() -> Snapshot {
        Solver::new().solve(&textbook()).unwrap().snapshot().unwrap()
    }

    #[test]
    fn test_rhs_identity_update() {
        let snapshot = solved_textbook();
        let revision = snapshot.change_rhs(&[4.0, 12.0, 18.0]).unwrap();
        for (new, old) in revision.tableau.b.iter().zip(&snapshot.tableau.b) {
            assert_close(*new, *old);
        }
    }

    #[test]
    fn test_rhs_change_stays_optimal() {
        // 2x2 <= 18: the optimum moves to x1=0, x2=9, z=45
        let snapshot = solved_textbook();
        let solution = Solver::new()
            .update(&snapshot, &SensitivityRequest::RhsChange { b: vec![4.0, 18.0, 18.0] })
            .unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.value_of("x2").unwrap(), 9.0);
        assert_close(solution.value_of("x1").unwrap(), 0.0);
        assert_close(solution.objective(), 45.0);
    }

    #[test]
    fn test_rhs_change_rejects_wrong_length() {
        let snapshot = solved_textbook();
        assert_eq!(
            snapshot.change_rhs(&[1.0]).unwrap_err(),
            SolverError::DimensionMismatch {
                what: "rows of b",
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn test_objective_change_reoptimises() {
        // max 3x1 + 1x2: optimum moves to x1=4, x2=3, z=15
        let snapshot = solved_textbook();
        let revision = snapshot.change_objective(&[3.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(revision.tableau.basis, snapshot.tableau.basis);
        let solution = Solver::new().resolve(&revision).unwrap();
        assert_close(solution.value_of("x1").unwrap(), 4.0);
        assert_close(solution.value_of("x2").unwrap(), 3.0);
        assert_close(solution.objective(), 15.0);

        assert!(snapshot.change_objective(&[1.0]).is_err());
    }

    #[test]
    fn test_satisfied_constraint_keeps_optimum() {
        // x1 + x2 <= 8 holds at (2, 6)
        let snapshot = solved_textbook();
        let request = SensitivityRequest::NewConstraints {
            rows: vec![vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0]],
            rhs: vec![8.0],
            costs: None,
        };
        let solution = Solver::new().update(&snapshot, &request).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.pivots(), 0);
        assert_close(solution.objective(), 36.0);
        assert_eq!(solution.tableau.x.last().map(String::as_str), Some("s4"));
        assert_eq!(solution.tableau.basis.last().map(String::as_str), Some("s4"));

        // snapshot untouched
        assert_eq!(snapshot.tableau.rows(), 3);
    }

    #[test]
    fn test_cutting_constraint_repairs_feasibility() {
        // x1 + x2 <= 7 cuts off (2, 6): optimum becomes x1=1, x2=6, z=33
        let snapshot = solved_textbook();
        let revision = snapshot
            .add_constraints(&[vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0]], &[7.0], None)
            .unwrap();
        assert!(revision.tableau.b[3] < 0.0);
        assert_eq!(revision.initial_a[3], vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(revision.initial_a[0].len(), 6);

        let solution = Solver::new().resolve(&revision).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.pivots(), 1);
        assert_close(solution.value_of("x1").unwrap(), 1.0);
        assert_close(solution.value_of("x2").unwrap(), 6.0);
        assert_close(solution.objective(), 33.0);
    }

    #[test]
    fn test_new_constraint_validation() {
        let snapshot = solved_textbook();
        assert!(matches!(
            snapshot.add_constraints(&[vec![1.0, 1.0, 0.0, 0.0, 0.0]], &[7.0], None),
            Err(SolverError::DimensionMismatch { .. })
        ));
        assert_eq!(
            snapshot
                .add_constraints(&[vec![1.0, 1.0, 0.0, 0.0, 0.0, 2.0]], &[7.0], None)
                .unwrap_err(),
            SolverError::NonUnitSlack { row: 0 }
        );
        assert!(matches!(
            snapshot.add_constraints(&[vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0]], &[7.0, 1.0], None),
            Err(SolverError::DimensionMismatch { .. })
        ));
        assert_eq!(
            snapshot
                .add_constraints(&[vec![1.0, 1.0, 0.0, 1.0, 0.0, 1.0]], &[7.0], None)
                .unwrap_err(),
            SolverError::NonUnitSlack { row: 0 }
        );
    }

    #[test]
    fn test_new_variable_enters() {
        // x3 with column (1, 1, 2) and profit 10 beats the current mix
        let snapshot = solved_textbook();
        let revision = snapshot
            .add_variables(&[vec![1.0], vec![1.0], vec![2.0]], &[10.0], &names(&["x3"]))
            .unwrap();
        assert_eq!(revision.tableau.x, names(&["x1", "x2", "x3", "s1", "s2", "s3"]));
        assert_eq!(revision.tableau.c[2], 10.0);
        assert_eq!(revision.initial_a[2], vec![3.0, 2.0, 2.0, 0.0, 0.0, 1.0]);

        let solution = Solver::new().resolve(&revision).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);

        // Cross-check against solving the enlarged problem from scratch.
        let fresh = Tableau::new(
            revision.initial_a.clone(),
            vec![4.0, 12.0, 18.0],
            revision.tableau.c.clone(),
            revision.tableau.x.clone(),
            names(&["s1", "s2", "s3"]),
        )
        .unwrap();
        let expected = Solver::new().solve(&fresh).unwrap();
        assert_close(solution.objective(), expected.objective());
    }

    #[test]
    fn test_new_variable_rejects_duplicates() {
        let snapshot = solved_textbook();
        assert_eq!(
            snapshot
                .add_variables(&[vec![1.0], vec![1.0], vec![1.0]], &[1.0], &names(&["x1"]))
                .unwrap_err(),
            SolverError::DuplicateVariable { name: "x1".to_string() }
        );
        assert!(matches!(
            snapshot.add_variables(&[vec![1.0], vec![1.0]], &[1.0], &names(&["x3"])),
            Err(SolverError::DimensionMismatch { .. })
        ));
    }

    /// max x1 + 5x2, x1 + 2x2 <= 12, 3x1 + 2x2 <= 18, x1 <= 4.
    /// Optimal at x1=0, x2=6 with x1 non-basic.
    fn idle_x1() -> Tableau {
        Tableau::new(
            vec![
                vec![1.0, 2.0, 1.0, 0.0, 0.0],
                vec![3.0, 2.0, 0.0, 1.0, 0.0],
                vec![1.0, 0.0, 0.0, 0.0, 1.0],
            ],
            vec![12.0, 18.0, 4.0],
            vec![1.0, 5.0, 0.0, 0.0, 0.0],
            names(&["x1", "x2", "s1", "s2", "s3"]),
            names(&["s1", "s2", "s3"]),
        )
        .unwrap()
    }

    /// Solve the raw problem from the slack basis.
    fn solve_fresh(a: Matrix, b: Vec<f64>, like: &Tableau) -> Solution {
        let m = a.len();
        let basis = like.x[like.cols() - m..].to_vec();
        let fresh = Tableau::new(a, b, like.c.clone(), like.x.clone(), basis).unwrap();
        Solver::new().solve(&fresh).unwrap()
    }

    #[test]
    fn test_coefficient_change_on_non_basic_column() {
        let solver = Solver::new();
        let snapshot = solver.solve(&idle_x1()).unwrap().snapshot().unwrap();
        assert!(!snapshot.tableau.is_basic("x1"));

        let mut a = snapshot.initial_a.clone();
        a[0][0] = 0.2;
        let revision = snapshot.change_coefficients(&a).unwrap();
        let expected = mat_vec(&snapshot.basis_inverse, &column(&a, 0)).unwrap();
        assert_eq!(column(&revision.tableau.a, 0), expected);
        assert_eq!(revision.initial_a, a);
        assert_eq!(column(&revision.tableau.a, 1), column(&snapshot.tableau.a, 1));

        let solution = solver.resolve(&revision).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!(solution.tableau.is_basic("x1"));
        assert_close(
            solution.objective(),
            solve_fresh(a, vec![12.0, 18.0, 4.0], &revision.tableau).objective(),
        );
    }

    #[test]
    fn test_rhs_change_after_coefficient_change() {
        // x1 enters once it only uses 0.2 of the first resource; the basis
        // inverse of the new optimum must map the raw RHS again.
        let solver = Solver::new();
        let snapshot = solver.solve(&idle_x1()).unwrap().snapshot().unwrap();
        let mut a = snapshot.initial_a.clone();
        a[0][0] = 0.2;
        let changed = solver
            .update(&snapshot, &SensitivityRequest::CoefficientChange { a: a.clone() })
            .unwrap();
        let snapshot = changed.snapshot().unwrap();

        let identity = snapshot.change_rhs(&[12.0, 18.0, 4.0]).unwrap();
        for (new, old) in identity.tableau.b.iter().zip(&snapshot.tableau.b) {
            assert_close(*new, *old);
        }

        let solution = solver
            .update(&snapshot, &SensitivityRequest::RhsChange { b: vec![12.0, 20.0, 4.0] })
            .unwrap();
        let expected = solve_fresh(a, vec![12.0, 20.0, 4.0], &snapshot.tableau);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.objective(), 220.0 / 7.0);
        assert_close(solution.objective(), expected.objective());
        for name in ["x1", "x2"] {
            assert_close(solution.value_of(name).unwrap(), expected.value_of(name).unwrap());
        }
    }

    #[test]
    fn test_coefficient_change_on_slack_column_fails() {
        // Scaling a slack column describes the same LP but breaks the basis
        // inverse read off the slack block.
        let snapshot = solved_textbook();
        let mut a = snapshot.initial_a.clone();
        a[2][4] = 2.0;
        assert_eq!(
            snapshot.change_coefficients(&a).unwrap_err(),
            SolverError::SlackColumnChanged {
                variable: "s3".to_string(),
                column: 4
            }
        );

        let mut a = snapshot.initial_a.clone();
        a[0][3] = 1.0;
        assert_eq!(
            snapshot.change_coefficients(&a).unwrap_err(),
            SolverError::SlackColumnChanged {
                variable: "s2".to_string(),
                column: 3
            }
        );
    }

    #[test]
    fn test_capture_checks_initial_matrix() {
        let solution = Solver::new().solve(&textbook()).unwrap();
        assert_eq!(
            Snapshot::capture(solution.tableau.clone(), vec![vec![1.0], vec![0.0], vec![3.0]]).unwrap_err(),
            SolverError::DimensionMismatch {
                what: "columns of initial A",
                expected: 5,
                found: 1
            }
        );

        let mut initial_a = textbook().a;
        initial_a[1][4] = 1.0;
        assert_eq!(
            Snapshot::capture(solution.tableau, initial_a).unwrap_err(),
            SolverError::SlackColumnChanged {
                variable: "s3".to_string(),
                column: 4
            }
        );
    }

    #[test]
    fn test_rhs_change_after_new_variable() {
        let solver = Solver::new();
        let request = SensitivityRequest::NewVariables {
            columns: vec![vec![1.0], vec![1.0], vec![2.0]],
            costs: vec![10.0],
            names: names(&["x3"]),
        };
        let enlarged = solver.update(&solved_textbook(), &request).unwrap();
        let snapshot = enlarged.snapshot().unwrap();
        assert_eq!(snapshot.initial_a[2], vec![3.0, 2.0, 2.0, 0.0, 0.0, 1.0]);

        let solution = solver
            .update(&snapshot, &SensitivityRequest::RhsChange { b: vec![4.0, 12.0, 20.0] })
            .unwrap();
        let expected = solve_fresh(snapshot.initial_a.clone(), vec![4.0, 12.0, 20.0], &snapshot.tableau);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.objective(), expected.objective());
        assert_close(solution.value_of("x3").unwrap(), expected.value_of("x3").unwrap());
        assert_close(solution.value_of("s3").unwrap(), 4.0);
    }

    #[test]
    fn test_coefficient_change_after_new_constraint() {
        // 2x1 + x2 <= 5 pushes x1 out of the basis (x2=5, z=25); halving
        // its weight there brings x1 back at x1=4, x2=3, z=27.
        let solver = Solver::new();
        let request = SensitivityRequest::NewConstraints {
            rows: vec![vec![2.0, 1.0, 0.0, 0.0, 0.0, 1.0]],
            rhs: vec![5.0],
            costs: None,
        };
        let cut = solver.update(&solved_textbook(), &request).unwrap();
        assert_close(cut.objective(), 25.0);
        let snapshot = cut.snapshot().unwrap();
        assert!(!snapshot.tableau.is_basic("x1"));

        let mut a = snapshot.initial_a.clone();
        a[3][0] = 0.5;
        let solution = solver
            .update(&snapshot, &SensitivityRequest::CoefficientChange { a: a.clone() })
            .unwrap();
        let expected = solve_fresh(a, vec![4.0, 12.0, 18.0, 5.0], &snapshot.tableau);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_close(solution.objective(), 27.0);
        assert_close(solution.objective(), expected.objective());
        assert_close(solution.value_of("x1").unwrap(), 4.0);
        assert_close(solution.value_of("x2").unwrap(), 3.0);
    }

    #[test]
    fn test_coefficient_change_on_basic_column_fails() {
        let snapshot = solved_textbook();
        let mut a = snapshot.initial_a.clone();
        a[2][0] = 4.0;
        assert_eq!(
            snapshot.change_coefficients(&a).unwrap_err(),
            SolverError::BasisCoefficientChanged {
                variable: "x1".to_string(),
                column: 0
            }
        );
    }

    #[test]
    fn test_apply_dispatches_requests() {
        let snapshot = solved_textbook();
        let request = SensitivityRequest::ObjectiveChange {
            c: vec![3.0, 5.0, 0.0, 0.0, 0.0],
        };
        assert_eq!(snapshot.apply(&request).unwrap().tableau, snapshot.tableau);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_request_from_json() {
        let request: SensitivityRequest = serde_json::from_str(
            r#"{ "kind": "new_constraints", "rows": [[1, 1, 0, 0, 0, 1]], "rhs": [7] }"#,
        )
        .unwrap();
        let revision = solved_textbook().apply(&request).unwrap();
        let solution = Solver::new().resolve(&revision).unwrap();
        assert_close(solution.objective(), 33.0);
    }
}
