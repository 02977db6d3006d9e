//! Error types for cost matrices, instances and the cutting-plane loop.

use std::time::Duration;

use thiserror::Error as ThisError;

use crate::models::ArcSolution;

/// A cost matrix that cannot be handed to a solver.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum CostMatrixError {
    /// Fewer than three nodes (depot plus at least two customers).
    #[error("cost matrix needs at least 3 nodes, got {size}")]
    TooFewNodes { size: usize },
    /// A row whose length differs from the number of rows.
    #[error("cost matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Flat data whose length is not `size * size`.
    #[error("cost matrix data has {len} entries, expected {expected}")]
    DataLength { len: usize, expected: usize },
    /// A NaN entry.
    #[error("cost from {from} to {to} is not a number")]
    NotANumber { from: usize, to: usize },
    /// A negative entry.
    #[error("cost from {from} to {to} is negative: {value}")]
    NegativeCost { from: usize, to: usize, value: f64 },
}

/// A problem instance that cannot be read or converted.
#[derive(Debug, ThisError)]
pub enum InstanceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid instance: {0}")]
    Invalid(String),
    #[error(transparent)]
    CostMatrix(#[from] CostMatrixError),
}

impl InstanceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Failure of the cutting-plane loop or of a static formulation solve.
///
/// None of these are retried internally: each reflects either an
/// environment problem (the solver) or an input that no further cutting
/// can repair.
#[derive(Debug, ThisError)]
pub enum CutLoopError {
    #[error(transparent)]
    InvalidCostMatrix(#[from] CostMatrixError),
    /// The external solver could not be invoked.
    #[error("solver unavailable: {reason}")]
    SolverUnavailable { reason: String },
    /// The solver proved the current model infeasible.
    #[error("model is infeasible at iteration {iteration}")]
    InfeasibleModel { iteration: usize },
    /// The solver gave up on a single call.
    #[error("solver timed out at iteration {iteration}")]
    SolverTimeout { iteration: usize },
    /// The iteration cap was reached before a single tour was found.
    ///
    /// `best` is the last relaxed solution; its objective is a lower bound.
    #[error("no single tour after {limit} iterations")]
    IterationLimitExceeded {
        limit: usize,
        best: Option<Box<ArcSolution>>,
    },
    /// The wall-clock budget ran out between two iterations.
    #[error("no single tour after {elapsed:?}")]
    TimeLimitExceeded {
        elapsed: Duration,
        best: Option<Box<ArcSolution>>,
    },
    /// The solver returned values that do not describe a permutation.
    #[error("malformed solver solution at iteration {iteration}: {reason}")]
    MalformedSolution { iteration: usize, reason: String },
    /// Subtours were found but every one of them was already cut.
    #[error("no new subtour cut could be added at iteration {iteration}")]
    Stalled { iteration: usize },
    /// The eager DFJ formulation would be too large to build.
    #[error("full subtour enumeration refused for {nodes} nodes (limit {limit})")]
    FormulationTooLarge { nodes: usize, limit: usize },
}

impl CutLoopError {
    /// The best relaxed solution carried by a limit error, if any.
    pub fn best_solution(&self) -> Option<&ArcSolution> {
        match self {
            Self::IterationLimitExceeded { best, .. } | Self::TimeLimitExceeded { best, .. } => {
                best.as_deref()
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CutLoopError>;
