//! Test doubles and reference computations shared by the unit tests.

use std::cell::RefCell;

use crate::distance::CostMatrix;
use crate::models::ArcIndex;
use crate::program::{IntegerProgram, IpSolution, IpSolver, SolverConfig, SolverStatus};

/// The four-node symmetric instance whose optimal tour costs 80.
pub fn four_node_example() -> CostMatrix {
    CostMatrix::from_rows(vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ])
    .expect("square")
}

/// Cheapest tour by trying every order of the customers.
///
/// Returns `(cost, nodes)`; cost is infinite if every tour uses a
/// forbidden arc.
pub fn brute_force_optimum(matrix: &CostMatrix) -> (f64, Vec<usize>) {
    fn extend(
        matrix: &CostMatrix,
        tour: &mut Vec<usize>,
        used: &mut [bool],
        best: &mut (f64, Vec<usize>),
    ) {
        if tour.len() == used.len() {
            let cost = matrix.tour_cost(tour);
            if cost < best.0 {
                *best = (cost, tour.clone());
            }
            return;
        }
        for next in 1..used.len() {
            if used[next] {
                continue;
            }
            used[next] = true;
            tour.push(next);
            extend(matrix, tour, used, best);
            tour.pop();
            used[next] = false;
        }
    }

    let mut best = (f64::INFINITY, Vec::new());
    let mut used = vec![false; matrix.size()];
    used[0] = true;
    extend(matrix, &mut vec![0], &mut used, &mut best);
    best
}

/// Exact solver for programs whose variables are exactly the arcs of an
/// [`ArcIndex`] and whose feasible points are permutations.
///
/// Enumerates successor maps in lexicographic order and keeps the first
/// one with the lowest objective, so ties break deterministically.
pub struct EnumeratingSolver {
    arcs: ArcIndex,
    pub calls: RefCell<usize>,
}

impl EnumeratingSolver {
    pub fn new(arcs: ArcIndex) -> Self {
        Self {
            arcs,
            calls: RefCell::new(0),
        }
    }

    fn search(
        &self,
        program: &IntegerProgram,
        node: usize,
        successors: &mut Vec<usize>,
        used: &mut [bool],
        best: &mut Option<(f64, Vec<f64>)>,
    ) {
        let n = self.arcs.num_nodes();
        if node == n {
            let mut values = vec![0.0; self.arcs.len()];
            for (from, &to) in successors.iter().enumerate() {
                if let Some(p) = self.arcs.position(from, to) {
                    values[p] = 1.0;
                }
            }
            if !program.is_feasible(&values, 1e-9) {
                return;
            }
            let objective = program.objective_value(&values);
            let improves = best
                .as_ref()
                .map_or(true, |(current, _)| objective < *current - 1e-9);
            if improves {
                *best = Some((objective, values));
            }
            return;
        }
        for to in 0..n {
            if used[to] || self.arcs.position(node, to).is_none() {
                continue;
            }
            used[to] = true;
            successors.push(to);
            self.search(program, node + 1, successors, used, best);
            successors.pop();
            used[to] = false;
        }
    }
}

impl IpSolver for EnumeratingSolver {
    fn solve(&self, program: &IntegerProgram, _config: &SolverConfig) -> IpSolution {
        *self.calls.borrow_mut() += 1;
        if program.num_variables() != self.arcs.len() {
            return IpSolution::failed(SolverStatus::Unavailable)
                .with_message("only pure arc programs are supported");
        }

        let mut best = None;
        let mut used = vec![false; self.arcs.num_nodes()];
        self.search(program, 0, &mut Vec::new(), &mut used, &mut best);

        match best {
            Some((objective, values)) => IpSolution::optimal(values, objective),
            None => IpSolution::failed(SolverStatus::Infeasible),
        }
    }
}

/// Solver replaying a fixed list of outcomes, one per call.
///
/// Each scripted successor map is turned into arc values; calls beyond
/// the script report `Unavailable`. The number of constraints seen on
/// every call is recorded.
pub struct ScriptedSolver {
    arcs: ArcIndex,
    script: Vec<Result<Vec<usize>, SolverStatus>>,
    pub seen_constraints: RefCell<Vec<usize>>,
}

impl ScriptedSolver {
    pub fn new(arcs: ArcIndex, script: Vec<Result<Vec<usize>, SolverStatus>>) -> Self {
        Self {
            arcs,
            script,
            seen_constraints: RefCell::new(Vec::new()),
        }
    }
}

impl IpSolver for ScriptedSolver {
    fn solve(&self, program: &IntegerProgram, _config: &SolverConfig) -> IpSolution {
        let call = self.seen_constraints.borrow().len();
        self.seen_constraints
            .borrow_mut()
            .push(program.num_constraints());

        match self.script.get(call) {
            Some(Ok(successors)) => {
                let mut values = vec![0.0; program.num_variables()];
                for (from, &to) in successors.iter().enumerate() {
                    if let Some(p) = self.arcs.position(from, to) {
                        values[p] = 1.0;
                    }
                }
                let objective = program.objective_value(&values);
                IpSolution::optimal(values, objective)
            }
            Some(Err(status)) => IpSolution::failed(*status).with_message("scripted failure"),
            None => IpSolution::failed(SolverStatus::Unavailable).with_message("script exhausted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::assignment_program;

    #[test]
    fn test_brute_force_four_nodes() {
        let (cost, tour) = brute_force_optimum(&four_node_example());
        assert_eq!(cost, 80.0);
        assert!(tour == vec![0, 1, 3, 2] || tour == vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_enumerating_solver_relaxation() {
        let cm = four_node_example();
        let arcs = ArcIndex::from_matrix(&cm);
        let program = assignment_program(&arcs, "tsp");
        let solver = EnumeratingSolver::new(arcs);
        let sol = solver.solve(&program, &SolverConfig::default());
        assert!(sol.is_optimal());
        // Two 2-cycles 0 ↔ 1, 2 ↔ 3 come first in lexicographic order
        assert_eq!(sol.objective_value, Some(80.0));
        assert_eq!(*solver.calls.borrow(), 1);
    }
}
