//! Polynomial-size TSP formulations.
//!
//! - [`mtz_program`] — Miller–Tucker–Zemlin ordering variables with the
//!   Desrochers–Laporte lifting
//! - [`flow_program`] — single-commodity flow
//!
//! # Reference
//!
//! Miller, C.E., Tucker, A.W. & Zemlin, R.A. (1960). "Integer programming
//! formulation of traveling salesman problems", *J. ACM* 7(4), 326-329.
//!
//! Desrochers, M. & Laporte, G. (1991). "Improvements and extensions to the
//! Miller-Tucker-Zemlin subtour elimination constraints", *Operations
//! Research Letters* 10(1), 27-36.
//!
//! Gavish, B. & Graves, S.C. (1978). "The travelling salesman problem and
//! related problems", MIT Operations Research Center working paper OR 078-78.

use crate::models::ArcIndex;
use crate::program::{IntegerProgram, LinearConstraint, VarId};

use super::assignment_program;

/// Assignment program plus ordering variables `1 ≤ u_i ≤ n` on customers and
/// `u_i − u_j + n·x_ij + (n−2)·x_ji ≤ n − 1` for every customer pair.
pub fn mtz_program(arcs: &ArcIndex) -> IntegerProgram {
    let mut ip = assignment_program(arcs, "tsp-mtz");
    let n = arcs.num_nodes() - 1;
    let nf = n as f64;

    // u[i - 1] is the position of customer i on the tour
    let u: Vec<VarId> = (1..=n)
        .map(|i| ip.add_continuous(format!("u[{i}]"), 1.0, nf))
        .collect();

    for i in 1..=n {
        for j in 1..=n {
            if i == j {
                continue;
            }
            let mut terms = vec![(u[i - 1], 1.0), (u[j - 1], -1.0)];
            if let Some(p) = arcs.position(i, j) {
                terms.push((VarId(p), nf));
            }
            if let Some(p) = arcs.position(j, i) {
                if n > 2 {
                    terms.push((VarId(p), nf - 2.0));
                }
            }
            ip.add_constraint(LinearConstraint::less_equal(
                format!("mtz[{i},{j}]"),
                terms,
                nf - 1.0,
            ));
        }
    }

    ip
}

/// Assignment program plus a flow `0 ≤ f_ij ≤ n·x_ij` on every arc, where
/// each customer emits one more unit than it receives.
pub fn flow_program(arcs: &ArcIndex) -> IntegerProgram {
    let mut ip = assignment_program(arcs, "tsp-flow");
    let n = arcs.num_nodes() - 1;
    let nf = n as f64;

    let f: Vec<VarId> = arcs
        .arcs()
        .iter()
        .map(|arc| ip.add_continuous(format!("f[{},{}]", arc.from, arc.to), 0.0, nf))
        .collect();

    for (p, &fp) in f.iter().enumerate() {
        let arc = arcs.arc(p);
        ip.add_constraint(LinearConstraint::less_equal(
            format!("gub[{},{}]", arc.from, arc.to),
            vec![(fp, 1.0), (VarId(p), -nf)],
            0.0,
        ));
    }

    for node in 1..=n {
        let mut terms: Vec<(VarId, f64)> = arcs.outgoing(node).map(|p| (f[p], 1.0)).collect();
        terms.extend(arcs.incoming(node).map(|p| (f[p], -1.0)));
        ip.add_constraint(LinearConstraint::equal(format!("flow[{node}]"), terms, 1.0));
    }

    ip
}
