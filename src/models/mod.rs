//! Domain model types for the subtour-elimination TSP.
//!
//! Provides the core abstractions: arcs and their variable numbering,
//! integral solutions of the assignment relaxation (which may contain
//! subtours), and finished tours.

mod arc;
mod solution;
mod tour;

pub use arc::{Arc, ArcIndex};
pub use solution::ArcSolution;
pub use tour::Tour;
