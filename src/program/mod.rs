//! Integer programming layer.
//!
//! Provides a solver-agnostic model for minimisation programs over binary
//! and bounded continuous variables with linear constraints, the
//! [`IpSolver`] trait the cutting-plane loop talks to, and a default
//! backend on top of `good_lp`.
//!
//! # Key Components
//!
//! - **Model**: [`IntegerProgram`], [`LinearConstraint`], [`VarId`]
//! - **Solver**: [`IpSolver`] trait, [`IpSolution`], [`SolverStatus`]
//! - **Backend**: [`GoodLpSolver`] (pure Rust, `microlp`)
//!
//! # Design
//!
//! The solver is injected, never global. Any type implementing
//! [`IpSolver`] (an exact MIP wrapper, a scripted test double) can drive
//! the loop.

mod good_lp_solver;
mod model;
mod solver;

pub use good_lp_solver::GoodLpSolver;
pub use model::{IntegerProgram, LinearConstraint, Sense, VarDef, VarId, VarKind};
pub use solver::{IpSolution, IpSolver, SolverConfig, SolverStatus};
