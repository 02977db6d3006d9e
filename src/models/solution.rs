//! Integral solutions of the assignment relaxation.

use serde::Serialize;

use super::{Arc, Tour};
use crate::cuts::decompose_cycles;

/// An integral solution of the (cut-augmented) assignment relaxation.
///
/// Every node has exactly one successor; the selected arcs therefore split
/// the nodes into disjoint directed cycles. The cycles are derived from the
/// successors on construction, so the type is serialize-only. The solution is a TSP tour iff
/// there is exactly one cycle and it covers every node.
///
/// # Examples
///
/// ```
/// use u_subtour::models::ArcSolution;
///
/// // 0 → 1 → 0 and 2 → 3 → 2
/// let sol = ArcSolution::from_successors(vec![1, 0, 3, 2], 80.0);
/// assert_eq!(sol.cycles(), &[vec![0, 1], vec![2, 3]]);
/// assert!(!sol.is_single_tour());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcSolution {
    successors: Vec<usize>,
    cycles: Vec<Vec<usize>>,
    objective_value: f64,
}

impl ArcSolution {
    /// Builds a solution from a node → successor map.
    ///
    /// `successors` must be a permutation of `0..len`; the cycle starting at
    /// the depot is listed first.
    pub fn from_successors(successors: Vec<usize>, objective_value: f64) -> Self {
        let cycles = decompose_cycles(&successors);
        Self {
            successors,
            cycles,
            objective_value,
        }
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.successors.len()
    }

    pub fn successors(&self) -> &[usize] {
        &self.successors
    }

    pub fn successor(&self, node: usize) -> usize {
        self.successors[node]
    }

    /// Disjoint cycles, depot cycle first.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    pub fn num_cycles(&self) -> usize {
        self.cycles.len()
    }

    /// Objective value reported for this solution.
    ///
    /// Before termination this is a lower bound on the optimal tour cost.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Returns `true` if the arcs form one cycle through every node.
    pub fn is_single_tour(&self) -> bool {
        self.cycles.len() == 1 && self.cycles[0].len() == self.successors.len()
    }

    /// The selected arcs, ordered by tail node.
    pub fn selected_arcs(&self) -> Vec<Arc> {
        self.successors
            .iter()
            .enumerate()
            .map(|(from, &to)| Arc::new(from, to))
            .collect()
    }

    /// The tour, if this solution is a single Hamiltonian cycle.
    pub fn to_tour(&self) -> Option<Tour> {
        if !self.is_single_tour() {
            return None;
        }
        Some(Tour::new(self.cycles[0].clone(), self.objective_value))
    }
}
