//! Arc variables and their numbering.

use serde::{Deserialize, Serialize};

use crate::distance::CostMatrix;

/// A directed arc `from → to` between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Arc {
    pub from: usize,
    pub to: usize,
}

impl Arc {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Numbering of the allowed arcs of a cost matrix.
///
/// Arcs are numbered in row-major order, skipping self-loops and forbidden
/// (infinite-cost) arcs. The number of an arc is the position of its binary
/// variable in the integer program, so every formulation built over the
/// same matrix agrees on it.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::CostMatrix;
/// use u_subtour::models::{Arc, ArcIndex};
///
/// let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
/// let arcs = ArcIndex::from_matrix(&cm);
/// assert_eq!(arcs.len(), 6);
/// assert_eq!(arcs.arc(0), Arc::new(0, 1));
/// assert_eq!(arcs.position(2, 1), Some(5));
/// assert_eq!(arcs.position(1, 1), None);
/// ```
#[derive(Debug, Clone)]
pub struct ArcIndex {
    num_nodes: usize,
    arcs: Vec<Arc>,
    costs: Vec<f64>,
    lookup: Vec<Option<usize>>,
}

impl ArcIndex {
    /// Numbers every allowed arc of `matrix`.
    pub fn from_matrix(matrix: &CostMatrix) -> Self {
        let num_nodes = matrix.size();
        let mut arcs = Vec::with_capacity(num_nodes * num_nodes.saturating_sub(1));
        let mut costs = Vec::with_capacity(arcs.capacity());
        let mut lookup = vec![None; num_nodes * num_nodes];

        for from in 0..num_nodes {
            for to in 0..num_nodes {
                if !matrix.is_arc_allowed(from, to) {
                    continue;
                }
                lookup[from * num_nodes + to] = Some(arcs.len());
                arcs.push(Arc::new(from, to));
                costs.push(matrix.get(from, to));
            }
        }

        Self {
            num_nodes,
            arcs,
            costs,
            lookup,
        }
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of arc variables.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// The arc with the given number.
    pub fn arc(&self, position: usize) -> Arc {
        self.arcs[position]
    }

    /// Travel cost of the arc with the given number.
    pub fn cost(&self, position: usize) -> f64 {
        self.costs[position]
    }

    /// Number of the arc `from → to`, or `None` if it is not allowed.
    pub fn position(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.num_nodes || to >= self.num_nodes {
            return None;
        }
        self.lookup[from * self.num_nodes + to]
    }

    /// All arcs in numbering order.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Numbers of the allowed arcs leaving `node`.
    pub fn outgoing(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes).filter_map(move |to| self.position(node, to))
    }

    /// Numbers of the allowed arcs entering `node`.
    pub fn incoming(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes).filter_map(move |from| self.position(from, node))
    }

    /// Numbers of the allowed arcs with both endpoints in `nodes`.
    pub fn within(&self, nodes: &[usize]) -> Vec<usize> {
        let mut inside = Vec::new();
        for &from in nodes {
            for &to in nodes {
                if let Some(p) = self.position(from, to) {
                    inside.push(p);
                }
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> CostMatrix {
        CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_complete_graph_count() {
        let arcs = ArcIndex::from_matrix(&square());
        // (n+1)·n with n = 3
        assert_eq!(arcs.len(), 12);
        assert_eq!(arcs.num_nodes(), 4);
        for (p, arc) in arcs.arcs().iter().enumerate() {
            assert_ne!(arc.from, arc.to);
            assert_eq!(arcs.position(arc.from, arc.to), Some(p));
        }
    }

    #[test]
    fn test_forbidden_arcs_skipped() {
        let mut cm = square();
        cm.forbid(1, 2);
        cm.forbid(2, 1);
        let arcs = ArcIndex::from_matrix(&cm);
        assert_eq!(arcs.len(), 10);
        assert_eq!(arcs.position(1, 2), None);
        assert_eq!(arcs.position(2, 1), None);
        assert!(arcs.position(1, 3).is_some());
    }

    #[test]
    fn test_out_of_range_position() {
        let arcs = ArcIndex::from_matrix(&square());
        assert_eq!(arcs.position(4, 0), None);
        assert_eq!(arcs.position(0, 9), None);
    }

    #[test]
    fn test_outgoing_incoming() {
        let arcs = ArcIndex::from_matrix(&square());
        let out: Vec<Arc> = arcs.outgoing(2).map(|p| arcs.arc(p)).collect();
        assert_eq!(out, vec![Arc::new(2, 0), Arc::new(2, 1), Arc::new(2, 3)]);
        let inc: Vec<Arc> = arcs.incoming(0).map(|p| arcs.arc(p)).collect();
        assert_eq!(inc, vec![Arc::new(1, 0), Arc::new(2, 0), Arc::new(3, 0)]);
    }

    #[test]
    fn test_within() {
        let arcs = ArcIndex::from_matrix(&square());
        let inside: Vec<Arc> = arcs.within(&[1, 3]).into_iter().map(|p| arcs.arc(p)).collect();
        assert_eq!(inside, vec![Arc::new(1, 3), Arc::new(3, 1)]);
        assert_eq!(arcs.within(&[0, 1, 2]).len(), 6);
    }

    #[test]
    fn test_costs_follow_matrix() {
        let cm = square();
        let arcs = ArcIndex::from_matrix(&cm);
        for p in 0..arcs.len() {
            let a = arcs.arc(p);
            assert_eq!(arcs.cost(p), cm.get(a.from, a.to));
        }
    }
}
