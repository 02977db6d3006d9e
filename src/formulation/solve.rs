//! One-shot solve of a static TSP formulation.

use std::time::{Duration, Instant};

use log::info;
use serde::Serialize;

use crate::cutloop::require_optimal;
use crate::cuts::{successors_from_values, DEFAULT_INTEGRALITY_TOLERANCE};
use crate::distance::CostMatrix;
use crate::error::{CutLoopError, Result};
use crate::models::{ArcIndex, ArcSolution, Tour};
use crate::program::{IpSolver, SolverConfig};

use super::{flow_program, full_dfj_program, mtz_program, DEFAULT_FULL_DFJ_NODE_LIMIT};

/// Static formulations solvable with a single solver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Formulation {
    /// Miller–Tucker–Zemlin ordering constraints.
    Mtz,
    /// Single-commodity flow.
    SingleCommodityFlow,
    /// Every subtour elimination constraint enumerated up front.
    FullDfj,
}

/// Outcome of [`solve_static`].
#[derive(Debug, Clone, Serialize)]
pub struct StaticSolveResult {
    pub formulation: Formulation,
    pub tour: Tour,
    pub solution: ArcSolution,
    pub num_variables: usize,
    pub num_constraints: usize,
    pub elapsed: Duration,
}

/// Builds the chosen formulation for `matrix` and solves it once.
///
/// # Errors
///
/// Cost matrix validation errors, [`CutLoopError::FormulationTooLarge`] for
/// [`Formulation::FullDfj`] above [`DEFAULT_FULL_DFJ_NODE_LIMIT`] nodes,
/// solver failures, and [`CutLoopError::MalformedSolution`] if the decoded
/// arcs are not a single Hamiltonian cycle.
pub fn solve_static<S: IpSolver + ?Sized>(
    matrix: &CostMatrix,
    formulation: Formulation,
    solver: &S,
    config: &SolverConfig,
) -> Result<StaticSolveResult> {
    matrix.validate()?;
    let started = Instant::now();
    let arcs = ArcIndex::from_matrix(matrix);

    let program = match formulation {
        Formulation::Mtz => mtz_program(&arcs),
        Formulation::SingleCommodityFlow => flow_program(&arcs),
        Formulation::FullDfj => full_dfj_program(&arcs, DEFAULT_FULL_DFJ_NODE_LIMIT)?,
    };

    let outcome = require_optimal(solver.solve(&program, config), 1)?;
    let successors = successors_from_values(&arcs, &outcome.values, DEFAULT_INTEGRALITY_TOLERANCE)
        .map_err(|reason| CutLoopError::MalformedSolution {
            iteration: 1,
            reason,
        })?;

    // Only the arc part of the objective is the tour cost
    let cost: f64 = successors
        .iter()
        .enumerate()
        .map(|(from, &to)| matrix.get(from, to))
        .sum();
    let solution = ArcSolution::from_successors(successors, cost);
    let tour = solution.to_tour().ok_or_else(|| CutLoopError::MalformedSolution {
        iteration: 1,
        reason: format!("{} cycles in a {:?} solution", solution.num_cycles(), formulation),
    })?;

    let elapsed = started.elapsed();
    info!(
        "{:?}: tour cost {:.4} with {} constraints in {:?}",
        formulation,
        tour.cost(),
        program.num_constraints(),
        elapsed
    );

    Ok(StaticSolveResult {
        formulation,
        tour,
        solution,
        num_variables: program.num_variables(),
        num_constraints: program.num_constraints(),
        elapsed,
    })
}
