//! Cut generation loop execution engine.
//!
//! # Algorithm
//!
//! 1. Build the assignment relaxation (degree constraints only)
//! 2. At each iteration:
//!    a. Solve the current program (degree constraints + every cut so far)
//!    b. Decompose the selected arcs into disjoint cycles
//!    c. If there is exactly one cycle covering every node, stop: it is an
//!       optimal tour
//!    d. Otherwise add `Σ x_ij ≤ |S| − 1` for every cycle `S` found and
//!       repeat
//! 3. The iteration cap and wall-clock budget are checked between
//!    iterations, never during a solver call
//!
//! Cuts are never removed, so each relaxation's optimum is a lower bound
//! that never decreases. Termination follows from the finite number of
//! node subsets.
//!
//! # Reference
//!
//! Dantzig, G., Fulkerson, R. & Johnson, S. (1954). "Solution of a
//! large-scale traveling-salesman problem", *J. Oper. Res. Soc. Am.* 2(4),
//! 393-410.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::cuts::{successors_from_values, CutPool, SubtourCut};
use crate::distance::CostMatrix;
use crate::error::{CutLoopError, Result};
use crate::formulation::assignment_program;
use crate::models::{ArcIndex, ArcSolution};
use crate::program::{IntegerProgram, IpSolution, IpSolver, SolverStatus};

use super::config::CutLoopConfig;
use super::types::{CutLoopResult, IterationRecord, LoopState};

/// Maps a non-optimal solver outcome to the matching loop error.
pub(crate) fn require_optimal(outcome: IpSolution, iteration: usize) -> Result<IpSolution> {
    match outcome.status {
        SolverStatus::Optimal => Ok(outcome),
        SolverStatus::Infeasible => Err(CutLoopError::InfeasibleModel { iteration }),
        SolverStatus::Timeout => Err(CutLoopError::SolverTimeout { iteration }),
        SolverStatus::Unavailable => Err(CutLoopError::SolverUnavailable {
            reason: outcome
                .message
                .unwrap_or_else(|| "solver reported no reason".to_string()),
        }),
    }
}

/// Lazy subtour elimination for the TSP.
///
/// Owns the growing integer program and cut pool for one instance; the
/// solver is borrowed and called once per [`step`](Self::step).
///
/// # Examples
///
/// ```
/// use u_subtour::cutloop::{CutGenerationLoop, CutLoopConfig};
/// use u_subtour::distance::CostMatrix;
/// use u_subtour::program::GoodLpSolver;
///
/// let cm = CostMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
///
/// let solver = GoodLpSolver::new();
/// let result = CutGenerationLoop::new(&cm, &solver, CutLoopConfig::default())
///     .unwrap()
///     .run()
///     .unwrap();
/// assert!((result.cost() - 80.0).abs() < 1e-6);
/// assert_eq!(result.tour.len(), 4);
/// ```
pub struct CutGenerationLoop<'a, S: IpSolver + ?Sized> {
    solver: &'a S,
    config: CutLoopConfig,
    arcs: ArcIndex,
    program: IntegerProgram,
    pool: CutPool,
    state: LoopState,
    iterations: usize,
    history: Vec<IterationRecord>,
    last: Option<ArcSolution>,
    started: Option<Instant>,
}

impl<'a, S: IpSolver + ?Sized> CutGenerationLoop<'a, S> {
    /// Validates `matrix` and builds the initial relaxation.
    ///
    /// # Errors
    ///
    /// [`CutLoopError::InvalidCostMatrix`] if the matrix is rejected by
    /// [`CostMatrix::validate`].
    pub fn new(matrix: &CostMatrix, solver: &'a S, config: CutLoopConfig) -> Result<Self> {
        matrix.validate()?;
        let arcs = ArcIndex::from_matrix(matrix);
        let program = assignment_program(&arcs, "tsp-dfj-lazy");
        debug!(
            "relaxation: {} nodes, {} arc variables, {} degree constraints",
            arcs.num_nodes(),
            arcs.len(),
            program.num_constraints()
        );

        Ok(Self {
            solver,
            config,
            arcs,
            program,
            pool: CutPool::new(),
            state: LoopState::Relaxed,
            iterations: 0,
            history: Vec::new(),
            last: None,
            started: None,
        })
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Solver calls made so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Cuts added so far.
    pub fn cut_count(&self) -> usize {
        self.pool.len()
    }

    /// Degree constraints plus cuts currently in the program.
    pub fn constraint_count(&self) -> usize {
        self.program.num_constraints()
    }

    /// The cut pool, in insertion order.
    pub fn cuts(&self) -> &CutPool {
        &self.pool
    }

    /// The program that will be solved next.
    pub fn program(&self) -> &IntegerProgram {
        &self.program
    }

    /// Arc numbering shared by the program and its solutions.
    pub fn arcs(&self) -> &ArcIndex {
        &self.arcs
    }

    /// The most recent solution returned by the solver.
    pub fn last_solution(&self) -> Option<&ArcSolution> {
        self.last.as_ref()
    }

    /// Wall time since the first [`step`](Self::step); zero before it.
    pub fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Per-iteration progress so far.
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    /// Performs one solve/inspect/augment pass.
    ///
    /// Does nothing once the loop is [`LoopState::Optimal`].
    ///
    /// # Errors
    ///
    /// Solver failures, [`CutLoopError::MalformedSolution`],
    /// [`CutLoopError::Stalled`], and the iteration/time limits (which carry
    /// the last relaxed solution).
    pub fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Optimal {
            return Ok(self.state);
        }

        let started = *self.started.get_or_insert_with(Instant::now);

        if let Some(limit) = self.config.max_iterations {
            if self.iterations >= limit {
                return Err(CutLoopError::IterationLimitExceeded {
                    limit,
                    best: self.last.clone().map(Box::new),
                });
            }
        }
        if let Some(limit) = self.config.time_limit {
            let elapsed = started.elapsed();
            if self.iterations > 0 && elapsed >= limit {
                return Err(CutLoopError::TimeLimitExceeded {
                    elapsed,
                    best: self.last.clone().map(Box::new),
                });
            }
        }

        self.iterations += 1;
        let iteration = self.iterations;

        let outcome = require_optimal(
            self.solver.solve(&self.program, &self.config.solver),
            iteration,
        )?;
        let successors =
            successors_from_values(&self.arcs, &outcome.values, self.config.integrality_tolerance)
                .map_err(|reason| CutLoopError::MalformedSolution { iteration, reason })?;
        let objective_value = outcome
            .objective_value
            .unwrap_or_else(|| self.program.objective_value(&outcome.values));
        let solution = ArcSolution::from_successors(successors, objective_value);
        debug!("iteration {iteration}: cycles {:?}", solution.cycles());

        let mut cuts_added = 0;
        if solution.is_single_tour() {
            self.state = LoopState::Optimal;
        } else {
            for cycle in solution.cycles() {
                let cut = SubtourCut::new(cycle.clone());
                debug_assert!(cut.is_violated_by(&solution));
                let constraint = cut.to_constraint(&self.arcs);
                if self.pool.insert(cut) {
                    self.program.add_constraint(constraint);
                    cuts_added += 1;
                } else {
                    warn!("iteration {iteration}: cut over {cycle:?} already present");
                }
            }
        }

        let record = IterationRecord {
            iteration,
            objective_value,
            cycles_found: solution.num_cycles(),
            cuts_added,
            total_cuts: self.pool.len(),
        };
        info!(
            "iteration {:>4}: {:>3} cycles, {:>3} cuts added ({} total), objective {:.4}",
            record.iteration,
            record.cycles_found,
            record.cuts_added,
            record.total_cuts,
            record.objective_value
        );
        self.history.push(record);
        self.last = Some(solution);

        if self.state == LoopState::Relaxed && cuts_added == 0 {
            return Err(CutLoopError::Stalled { iteration });
        }

        Ok(self.state)
    }

    /// Steps until the loop is optimal or fails.
    pub fn run(mut self) -> Result<CutLoopResult> {
        while self.step()? == LoopState::Relaxed {}

        let elapsed = self.elapsed();
        let solution = self.last.take().ok_or_else(|| CutLoopError::MalformedSolution {
            iteration: self.iterations,
            reason: "loop finished without a solution".to_string(),
        })?;
        let tour = solution.to_tour().ok_or_else(|| CutLoopError::MalformedSolution {
            iteration: self.iterations,
            reason: "final solution is not a single tour".to_string(),
        })?;

        info!(
            "optimal tour cost {:.4} after {} iterations, {} cuts, {:?}",
            tour.cost(),
            self.iterations,
            self.pool.len(),
            elapsed
        );

        Ok(CutLoopResult {
            tour,
            solution,
            iterations: self.iterations,
            cuts_added: self.pool.len(),
            elapsed,
            history: self.history,
        })
    }
}

/// Solves the TSP on `matrix` with lazy subtour elimination.
///
/// Shorthand for [`CutGenerationLoop::new`] followed by
/// [`CutGenerationLoop::run`].
pub fn solve_tsp<S: IpSolver + ?Sized>(
    matrix: &CostMatrix,
    solver: &S,
    config: &CutLoopConfig,
) -> Result<CutLoopResult> {
    CutGenerationLoop::new(matrix, solver, config.clone())?.run()
}
