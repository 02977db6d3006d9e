//! Loop state and result types.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::models::{ArcSolution, Tour};

/// State of the cut generation loop.
///
/// `Relaxed → Relaxed` when cuts are added, `Relaxed → Optimal` when the
/// relaxation yields a single Hamiltonian cycle. `Optimal` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopState {
    /// The current model may still admit multi-cycle solutions.
    Relaxed,
    /// A single tour covering every node was found.
    Optimal,
}

/// Progress of one solve/inspect/augment pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRecord {
    /// 1-based solver call number.
    pub iteration: usize,
    /// Objective of the relaxed solution (a lower bound on the tour cost).
    pub objective_value: f64,
    /// Number of cycles in the solution.
    pub cycles_found: usize,
    /// Cuts added in this pass.
    pub cuts_added: usize,
    /// Cuts in the pool after this pass.
    pub total_cuts: usize,
}

impl fmt::Display for IterationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10} {:>15} {:>20.4}",
            self.iteration, self.total_cuts, self.objective_value
        )
    }
}

/// Result of a converged cut generation loop.
#[derive(Debug, Clone, Serialize)]
pub struct CutLoopResult {
    /// Optimal tour, depot first.
    pub tour: Tour,
    /// Final arc solution (a single cycle).
    pub solution: ArcSolution,
    /// Solver calls made.
    pub iterations: usize,
    /// Subtour cuts added in total.
    pub cuts_added: usize,
    /// Wall time of the whole loop.
    pub elapsed: Duration,
    /// One record per iteration.
    pub history: Vec<IterationRecord>,
}

impl CutLoopResult {
    /// Cost of the optimal tour.
    pub fn cost(&self) -> f64 {
        self.tour.cost()
    }
}
