//! Subtour detection and subtour elimination cuts.
//!
//! - [`successors_from_values`] — node → successor map from 0/1 arc values, O(arcs)
//! - [`decompose_cycles`] — disjoint cycles of a successor map, O(n)
//! - [`SubtourCut`] — `Σ x_ij ≤ |S| − 1` over a node subset
//! - [`CutPool`] — append-only, duplicate-free collection of cuts

mod pool;
mod separation;

pub use pool::{CutPool, SubtourCut};
pub use separation::{decompose_cycles, successors_from_values, DEFAULT_INTEGRALITY_TOLERANCE};
