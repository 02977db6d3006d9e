//! Cutting-plane loop configuration.

use std::time::Duration;

use crate::cuts::DEFAULT_INTEGRALITY_TOLERANCE;
use crate::program::SolverConfig;

/// Configuration parameters for the cut generation loop.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_subtour::cutloop::CutLoopConfig;
///
/// let config = CutLoopConfig::default()
///     .with_max_iterations(50)
///     .with_time_limit(Duration::from_secs(30));
/// assert_eq!(config.max_iterations, Some(50));
/// assert_eq!(config.integrality_tolerance, 0.9999);
/// ```
#[derive(Debug, Clone)]
pub struct CutLoopConfig {
    /// Maximum number of solver calls (None for unbounded).
    pub max_iterations: Option<usize>,
    /// Wall-clock budget, checked between iterations only.
    pub time_limit: Option<Duration>,
    /// Values at or above this count as a selected arc.
    pub integrality_tolerance: f64,
    /// Settings passed to every solver call.
    pub solver: SolverConfig,
}

impl Default for CutLoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            time_limit: None,
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
            solver: SolverConfig::default(),
        }
    }
}

impl CutLoopConfig {
    /// Sets the maximum number of solver calls.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the integrality tolerance.
    pub fn with_integrality_tolerance(mut self, tol: f64) -> Self {
        self.integrality_tolerance = tol;
        self
    }

    /// Sets the per-call solver settings.
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}
