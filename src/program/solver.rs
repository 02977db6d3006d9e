//! Solver interface.

use std::time::Duration;

use super::model::IntegerProgram;

/// Status reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// No feasible solution exists.
    Infeasible,
    /// The solver could not be invoked, or failed for another reason.
    Unavailable,
    /// The solver exceeded its per-call time limit.
    Timeout,
}

/// Result of a single solver call.
#[derive(Debug, Clone)]
pub struct IpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// One value per program variable (empty unless `Optimal`).
    pub values: Vec<f64>,
    /// Objective value, if the solver reports one.
    pub objective_value: Option<f64>,
    /// Solve time in milliseconds.
    pub solve_time_ms: u64,
    /// Diagnostic text from the solver.
    pub message: Option<String>,
}

impl IpSolution {
    /// A successful solve.
    pub fn optimal(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: SolverStatus::Optimal,
            values,
            objective_value: Some(objective_value),
            solve_time_ms: 0,
            message: None,
        }
    }

    /// A failed solve carrying no values.
    pub fn failed(status: SolverStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
            solve_time_ms: 0,
            message: None,
        }
    }

    /// Attaches a diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether an optimal solution was found.
    pub fn is_optimal(&self) -> bool {
        self.status == SolverStatus::Optimal
    }
}

/// Per-call solver settings.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Time limit for a single call; honoured only by backends that
    /// support one.
    pub time_limit: Option<Duration>,
    /// Log the model handed to the backend.
    pub verbose: bool,
}

impl SolverConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Trait for integer-program solvers.
///
/// Implementors solve a minimisation program with binary and continuous
/// variables and linear constraints to optimality. The cutting-plane loop
/// treats them as black boxes: an exact MIP backend, a test double or any
/// other implementation honouring this contract can be plugged in.
pub trait IpSolver {
    /// Solves the program and returns its outcome.
    fn solve(&self, program: &IntegerProgram, config: &SolverConfig) -> IpSolution;
}

impl<S: IpSolver + ?Sized> IpSolver for &S {
    fn solve(&self, program: &IntegerProgram, config: &SolverConfig) -> IpSolution {
        (**self).solve(program, config)
    }
}

impl<S: IpSolver + ?Sized> IpSolver for Box<S> {
    fn solve(&self, program: &IntegerProgram, config: &SolverConfig) -> IpSolution {
        (**self).solve(program, config)
    }
}
