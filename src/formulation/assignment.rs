//! Assignment relaxation: binary arc variables with degree constraints.

use crate::models::ArcIndex;
use crate::program::{IntegerProgram, LinearConstraint, VarId};

/// Builds `min Σ c_ij·x_ij` subject to every node having exactly one
/// selected outgoing and one selected incoming arc.
///
/// Variable `p` of the returned program is arc `p` of `arcs`. Every other
/// TSP formulation in this crate starts from this program.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::CostMatrix;
/// use u_subtour::models::ArcIndex;
/// use u_subtour::formulation::assignment_program;
///
/// let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
/// let arcs = ArcIndex::from_matrix(&cm);
/// let ip = assignment_program(&arcs, "tsp");
/// assert_eq!(ip.num_variables(), 6);
/// assert_eq!(ip.num_constraints(), 6);
/// ```
pub fn assignment_program(arcs: &ArcIndex, name: &str) -> IntegerProgram {
    let mut ip = IntegerProgram::new(name);

    for arc in arcs.arcs() {
        ip.add_binary(format!("x[{},{}]", arc.from, arc.to));
    }
    ip.set_objective((0..arcs.len()).map(|p| (VarId(p), arcs.cost(p))).collect());

    for node in 0..arcs.num_nodes() {
        ip.add_constraint(LinearConstraint::equal(
            format!("out[{node}]"),
            arcs.outgoing(node).map(|p| (VarId(p), 1.0)).collect(),
            1.0,
        ));
        ip.add_constraint(LinearConstraint::equal(
            format!("in[{node}]"),
            arcs.incoming(node).map(|p| (VarId(p), 1.0)).collect(),
            1.0,
        ));
    }

    ip
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;

    #[test]
    fn test_degree_constraints() {
        let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let arcs = ArcIndex::from_matrix(&cm);
        let ip = assignment_program(&arcs, "tsp");

        assert_eq!(ip.num_variables(), 12);
        assert_eq!(ip.num_constraints(), 8);
        assert!(ip.validate().is_ok());
        for c in ip.constraints() {
            assert_eq!(c.terms.len(), 3);
            assert_eq!(c.rhs, 1.0);
        }
    }

    #[test]
    fn test_permutation_is_feasible() {
        let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let arcs = ArcIndex::from_matrix(&cm);
        let ip = assignment_program(&arcs, "tsp");

        let mut values = vec![0.0; arcs.len()];
        for (from, to) in [(0, 1), (1, 0), (2, 3), (3, 2)] {
            values[arcs.position(from, to).unwrap()] = 1.0;
        }
        assert!(ip.is_feasible(&values, 1e-9));
        assert!((ip.objective_value(&values) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_objective_uses_arc_costs() {
        let cm = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap();
        let arcs = ArcIndex::from_matrix(&cm);
        let ip = assignment_program(&arcs, "tsp");
        let coefs: Vec<f64> = ip.objective().iter().map(|&(_, c)| c).collect();
        assert_eq!(coefs, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
