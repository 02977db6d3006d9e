//! Hamiltonian tours.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Arc;

/// A closed tour starting and ending at the depot.
///
/// `nodes` lists every node once, starting with the depot; the return arc
/// to the depot is implied.
///
/// # Examples
///
/// ```
/// use u_subtour::models::Tour;
///
/// let tour = Tour::new(vec![0, 1, 3, 2], 80.0);
/// assert_eq!(tour.to_string(), "0 -> 1 -> 3 -> 2 -> 0");
/// assert_eq!(tour.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    nodes: Vec<usize>,
    cost: f64,
}

impl Tour {
    pub fn new(nodes: Vec<usize>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    /// Visit order, depot first.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Total travel cost including the return to the depot.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes on the tour.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit order with the depot repeated at the end.
    pub fn closed_sequence(&self) -> Vec<usize> {
        let mut seq = self.nodes.clone();
        if let Some(&first) = self.nodes.first() {
            seq.push(first);
        }
        seq
    }

    /// Arcs travelled, in visit order.
    pub fn arcs(&self) -> Vec<Arc> {
        self.closed_sequence()
            .windows(2)
            .map(|w| Arc::new(w[0], w[1]))
            .collect()
    }

    /// The same cycle travelled in the opposite direction.
    pub fn reversed(&self) -> Tour {
        let mut nodes = self.nodes.clone();
        if nodes.len() > 1 {
            nodes[1..].reverse();
        }
        Tour::new(nodes, self.cost)
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seq = self.closed_sequence();
        for (i, node) in seq.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
