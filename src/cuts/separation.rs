//! Subtour detection in integral assignment solutions.
//!
//! # Algorithm
//!
//! 1. Scan the arc variables once and record, for every node, the head of
//!    its selected outgoing arc (values ≥ tolerance count as 1). A node
//!    without exactly one selected outgoing and one selected incoming arc
//!    makes the solution malformed.
//! 2. Follow successor pointers from the depot, then from every node not
//!    yet visited in increasing order, collecting one cycle per start.
//!
//! Both passes are linear in the number of arcs and nodes respectively.

use crate::models::ArcIndex;

/// Default threshold above which a binary variable's value counts as 1.
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 0.9999;

/// Builds the node → successor map from arc variable values.
///
/// `values` holds one entry per arc of `arcs` (extra trailing values, such
/// as auxiliary variables of a static formulation, are ignored).
///
/// # Errors
///
/// Returns a description of the first node whose selected out-degree or
/// in-degree is not exactly one.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::CostMatrix;
/// use u_subtour::models::ArcIndex;
/// use u_subtour::cuts::successors_from_values;
///
/// let cm = CostMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
/// let arcs = ArcIndex::from_matrix(&cm);
/// let mut values = vec![0.0; arcs.len()];
/// for (from, to) in [(0, 1), (1, 2), (2, 0)] {
///     values[arcs.position(from, to).unwrap()] = 1.0;
/// }
/// assert_eq!(successors_from_values(&arcs, &values, 0.9999), Ok(vec![1, 2, 0]));
/// ```
pub fn successors_from_values(
    arcs: &ArcIndex,
    values: &[f64],
    tolerance: f64,
) -> Result<Vec<usize>, String> {
    if values.len() < arcs.len() {
        return Err(format!(
            "expected {} arc values, got {}",
            arcs.len(),
            values.len()
        ));
    }

    let n = arcs.num_nodes();
    let mut successor: Vec<Option<usize>> = vec![None; n];
    let mut in_degree = vec![0usize; n];

    for (p, arc) in arcs.arcs().iter().enumerate() {
        if values[p] < tolerance {
            continue;
        }
        if let Some(previous) = successor[arc.from] {
            return Err(format!(
                "node {} has two selected successors ({} and {})",
                arc.from, previous, arc.to
            ));
        }
        successor[arc.from] = Some(arc.to);
        in_degree[arc.to] += 1;
    }

    if let Some(node) = in_degree.iter().position(|&d| d != 1) {
        return Err(format!(
            "node {} has {} selected incoming arcs",
            node, in_degree[node]
        ));
    }

    successor
        .into_iter()
        .enumerate()
        .map(|(node, s)| s.ok_or_else(|| format!("node {node} has no selected successor")))
        .collect()
}

/// Splits a successor map into its disjoint cycles.
///
/// The depot's cycle comes first, the others in order of their smallest
/// starting node. Each cycle lists its nodes in travel order. Following
/// stops at the first node seen before, so a map that is not a permutation
/// still yields a finite result.
///
/// # Examples
///
/// ```
/// use u_subtour::cuts::decompose_cycles;
///
/// assert_eq!(decompose_cycles(&[1, 0, 3, 2]), vec![vec![0, 1], vec![2, 3]]);
/// assert_eq!(decompose_cycles(&[2, 0, 1]), vec![vec![0, 2, 1]]);
/// ```
pub fn decompose_cycles(successors: &[usize]) -> Vec<Vec<usize>> {
    let n = successors.len();
    let mut visited = vec![false; n];
    let mut cycles = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut current = start;
        while current < n && !visited[current] {
            visited[current] = true;
            cycle.push(current);
            current = successors[current];
        }
        cycles.push(cycle);
    }

    cycles
}
