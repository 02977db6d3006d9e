//! # u-subtour
//!
//! Exact TSP solving by lazy subtour elimination: the assignment
//! relaxation is solved repeatedly, and every subtour it returns is cut
//! off with a Dantzig–Fulkerson–Johnson constraint until the solution is a
//! single Hamiltonian cycle.
//!
//! ## Modules
//!
//! - [`distance`] — Cost matrix (asymmetric, forbidden arcs as `+∞`)
//! - [`models`] — Arc numbering, arc solutions and tours
//! - [`program`] — Solver-agnostic integer programs and the `good_lp` backend
//! - [`cuts`] — Cycle decomposition and the subtour cut pool
//! - [`cutloop`] — The cutting-plane loop
//! - [`formulation`] — Assignment, MTZ, single-commodity flow and full DFJ models
//! - [`instance`] — JSON instance files and random instances
//! - [`error`] — Error types

pub mod cutloop;
pub mod cuts;
pub mod distance;
pub mod error;
pub mod formulation;
pub mod instance;
pub mod models;
pub mod program;

#[cfg(test)]
mod testing;
