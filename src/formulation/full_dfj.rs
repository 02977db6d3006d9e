//! Dantzig–Fulkerson–Johnson formulation with every subtour elimination
//! constraint enumerated up front.
//!
//! The number of constraints grows as `2^(n+1)`; this exists as a baseline
//! for small instances. The cutting-plane loop adds the same constraints
//! lazily.
//!
//! # Reference
//!
//! Dantzig, G., Fulkerson, R. & Johnson, S. (1954). "Solution of a
//! large-scale traveling-salesman problem", *J. Oper. Res. Soc. Am.* 2(4),
//! 393-410.

use crate::cuts::SubtourCut;
use crate::error::{CutLoopError, Result};
use crate::models::ArcIndex;
use crate::program::IntegerProgram;

use super::assignment_program;

/// Default node limit for [`full_dfj_program`].
pub const DEFAULT_FULL_DFJ_NODE_LIMIT: usize = 12;

/// Assignment program plus the cut of every node subset `S` with
/// `2 ≤ |S| ≤ n` (all proper subsets of the `n + 1` nodes).
///
/// # Errors
///
/// [`CutLoopError::FormulationTooLarge`] if the instance has more than
/// `node_limit` nodes.
pub fn full_dfj_program(arcs: &ArcIndex, node_limit: usize) -> Result<IntegerProgram> {
    let nodes = arcs.num_nodes();
    if nodes > node_limit || nodes >= usize::BITS as usize {
        return Err(CutLoopError::FormulationTooLarge {
            nodes,
            limit: node_limit,
        });
    }

    let mut ip = assignment_program(arcs, "tsp-dfj");
    for mask in 1usize..(1 << nodes) - 1 {
        if mask.count_ones() < 2 {
            continue;
        }
        let subset: Vec<usize> = (0..nodes).filter(|&i| mask & (1 << i) != 0).collect();
        ip.add_constraint(SubtourCut::new(subset).to_constraint(arcs));
    }

    Ok(ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;

    #[test]
    fn test_constraint_count() {
        let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let arcs = ArcIndex::from_matrix(&cm);
        let ip = full_dfj_program(&arcs, DEFAULT_FULL_DFJ_NODE_LIMIT).unwrap();
        // 2^4 - 2 non-trivial subsets minus 4 singletons = 10 cuts
        assert_eq!(ip.num_constraints(), 8 + 10);
        assert!(ip.validate().is_ok());
    }

    #[test]
    fn test_too_large() {
        let points: Vec<(f64, f64)> = (0..6).map(|i| (i as f64, 0.0)).collect();
        let arcs = ArcIndex::from_matrix(&CostMatrix::from_points(&points));
        let err = full_dfj_program(&arcs, 5).unwrap_err();
        assert!(matches!(
            err,
            CutLoopError::FormulationTooLarge { nodes: 6, limit: 5 }
        ));
    }
}
