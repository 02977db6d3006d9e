//! Subtour elimination cuts and the append-only cut pool.

use std::collections::HashSet;

use crate::models::{ArcIndex, ArcSolution};
use crate::program::{LinearConstraint, VarId};

/// Subtour elimination constraint over a node subset `S`:
/// `Σ_{i,j ∈ S, i≠j} x_ij ≤ |S| − 1`.
///
/// The node set is stored sorted, which is also its canonical key.
///
/// # Examples
///
/// ```
/// use u_subtour::cuts::SubtourCut;
/// use u_subtour::models::ArcSolution;
///
/// let cut = SubtourCut::new(vec![3, 1]);
/// assert_eq!(cut.nodes(), &[1, 3]);
/// assert_eq!(cut.rhs(), 1.0);
///
/// let sol = ArcSolution::from_successors(vec![2, 3, 0, 1], 0.0);
/// assert_eq!(cut.lhs(&sol), 2.0);
/// assert!(cut.is_violated_by(&sol));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubtourCut {
    nodes: Vec<usize>,
}

impl SubtourCut {
    /// Creates the cut for the given nodes (order and duplicates ignored).
    pub fn new(mut nodes: Vec<usize>) -> Self {
        nodes.sort_unstable();
        nodes.dedup();
        Self { nodes }
    }

    /// Sorted node subset.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Right-hand side `|S| − 1`.
    pub fn rhs(&self) -> f64 {
        self.nodes.len().saturating_sub(1) as f64
    }

    /// Number of selected arcs of `solution` with both endpoints in `S`.
    ///
    /// Nodes of `S` outside the solution contribute nothing.
    pub fn lhs(&self, solution: &ArcSolution) -> f64 {
        self.nodes
            .iter()
            .filter_map(|&i| solution.successors().get(i))
            .filter(|j| self.nodes.binary_search(j).is_ok())
            .count() as f64
    }

    /// Signed slack `rhs − lhs` under `solution`; negative when violated.
    pub fn slack(&self, solution: &ArcSolution) -> f64 {
        self.rhs() - self.lhs(solution)
    }

    pub fn is_violated_by(&self, solution: &ArcSolution) -> bool {
        self.slack(solution) < 0.0
    }

    /// The constraint over the arc variables of `arcs`.
    pub fn to_constraint(&self, arcs: &ArcIndex) -> LinearConstraint {
        let terms = arcs
            .within(&self.nodes)
            .into_iter()
            .map(|p| (VarId(p), 1.0))
            .collect();
        LinearConstraint::less_equal(self.name(), terms, self.rhs())
    }

    fn name(&self) -> String {
        let nodes: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        format!("sec[{}]", nodes.join(","))
    }
}

/// Append-only collection of the subtour cuts added so far.
///
/// Cuts keep their insertion order and are never removed; inserting a node
/// set that is already present is refused.
#[derive(Debug, Clone, Default)]
pub struct CutPool {
    cuts: Vec<SubtourCut>,
    keys: HashSet<Vec<usize>>,
}

impl CutPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `cut`; returns `false` if an identical cut is already present.
    pub fn insert(&mut self, cut: SubtourCut) -> bool {
        if !self.keys.insert(cut.nodes.clone()) {
            return false;
        }
        self.cuts.push(cut);
        true
    }

    pub fn contains(&self, cut: &SubtourCut) -> bool {
        self.keys.contains(&cut.nodes)
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Cuts in insertion order.
    pub fn cuts(&self) -> &[SubtourCut] {
        &self.cuts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::program::Sense;

    #[test]
    fn test_canonical_nodes() {
        let a = SubtourCut::new(vec![4, 2, 2, 7]);
        let b = SubtourCut::new(vec![7, 4, 2]);
        assert_eq!(a, b);
        assert_eq!(a.size(), 3);
        assert_eq!(a.rhs(), 2.0);
    }

    #[test]
    fn test_cut_violated_by_its_cycle_only() {
        // 0 → 1 → 0, 2 → 3 → 4 → 2
        let sol = ArcSolution::from_successors(vec![1, 0, 3, 4, 2], 0.0);
        for cycle in sol.cycles() {
            let cut = SubtourCut::new(cycle.clone());
            assert_eq!(cut.lhs(&sol), cycle.len() as f64);
            assert_eq!(cut.slack(&sol), -1.0);
        }

        let tour = ArcSolution::from_successors(vec![1, 2, 3, 4, 0], 0.0);
        for cycle in sol.cycles() {
            assert!(!SubtourCut::new(cycle.clone()).is_violated_by(&tour));
        }
    }

    #[test]
    fn test_nodes_outside_solution_ignored() {
        // 0 → 1 → 0, 2 → 2 is not part of the cut
        let sol = ArcSolution::from_successors(vec![1, 0, 2], 0.0);
        let cut = SubtourCut::new(vec![0, 1, 7, 9]);
        assert_eq!(cut.lhs(&sol), 2.0);
        assert_eq!(cut.rhs(), 3.0);
        assert!(!cut.is_violated_by(&sol));
    }

    #[test]
    fn test_to_constraint() {
        let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let arcs = ArcIndex::from_matrix(&cm);
        let c = SubtourCut::new(vec![3, 1, 2]).to_constraint(&arcs);
        assert_eq!(c.name, "sec[1,2,3]");
        assert_eq!(c.sense, Sense::LessEqual);
        assert_eq!(c.rhs, 2.0);
        assert_eq!(c.terms.len(), 6);

        // Selecting 1 → 2 → 3 → 1 violates the constraint by one
        let mut values = vec![0.0; arcs.len()];
        for (from, to) in [(1, 2), (2, 3), (3, 1)] {
            values[arcs.position(from, to).unwrap()] = 1.0;
        }
        assert_eq!(c.slack(&values), -1.0);
    }

    #[test]
    fn test_constraint_skips_forbidden_arcs() {
        let mut cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        cm.forbid(1, 2);
        let arcs = ArcIndex::from_matrix(&cm);
        let c = SubtourCut::new(vec![1, 2]).to_constraint(&arcs);
        assert_eq!(c.terms.len(), 1);
    }

    #[test]
    fn test_pool_append_only() {
        let mut pool = CutPool::new();
        assert!(pool.is_empty());
        assert!(pool.insert(SubtourCut::new(vec![1, 2])));
        assert!(pool.insert(SubtourCut::new(vec![0, 3])));
        assert!(!pool.insert(SubtourCut::new(vec![2, 1])));
        assert_eq!(pool.len(), 2);
        assert!(pool.contains(&SubtourCut::new(vec![3, 0])));
        assert_eq!(pool.cuts()[0].nodes(), &[1, 2]);
        assert_eq!(pool.cuts()[1].nodes(), &[0, 3]);
    }
}
