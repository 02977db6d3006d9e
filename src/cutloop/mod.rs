//! Lazy subtour elimination (cutting-plane loop) for the TSP.
//!
//! Starts from the assignment relaxation and adds a subtour elimination
//! cut for every cycle of each non-tour solution until the solver returns
//! a single Hamiltonian cycle.

mod config;
mod runner;
mod types;

pub use config::CutLoopConfig;
pub(crate) use runner::require_optimal;
pub use runner::{solve_tsp, CutGenerationLoop};
pub use types::{CutLoopResult, IterationRecord, LoopState};
