//! Integer programming formulations of the TSP.
//!
//! - [`assignment_program`] — degree constraints only; the relaxation the
//!   cutting-plane loop starts from
//! - [`mtz_program`] — Miller–Tucker–Zemlin, O(n²) constraints
//! - [`flow_program`] — single-commodity flow, O(n²) constraints
//! - [`full_dfj_program`] — every subtour elimination constraint, O(2ⁿ)
//!
//! All formulations number their arc variables with the same
//! [`ArcIndex`](crate::models::ArcIndex), so solutions decode identically.

mod assignment;
mod compact;
mod full_dfj;
mod solve;

pub use assignment::assignment_program;
pub use compact::{flow_program, mtz_program};
pub use full_dfj::{full_dfj_program, DEFAULT_FULL_DFJ_NODE_LIMIT};
pub use solve::{solve_static, Formulation, StaticSolveResult};
