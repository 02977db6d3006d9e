//! Travel-cost matrices.
//!
//! Provides a dense cost matrix for routing problems, with node 0 as depot.

mod matrix;

pub use matrix::CostMatrix;
