//! [`IpSolver`] backed by the `good_lp` modeller and its pure-Rust
//! `microlp` branch-and-bound solver.

use std::time::Instant;

use good_lp::{constraint, microlp, variable, Expression, ProblemVariables, ResolutionError};
use good_lp::{Solution, SolverModel, Variable};
use log::{debug, info, warn};

use super::model::{IntegerProgram, LinearConstraint, Sense, VarKind};
use super::solver::{IpSolution, IpSolver, SolverConfig, SolverStatus};

/// Exact solver for small and medium programs.
///
/// Needs no external binary. `SolverConfig::time_limit` is ignored because
/// `microlp` has no time limit of its own. With `SolverConfig::verbose` the
/// model handed to `microlp` is logged at `info` level, one constraint per
/// line.
///
/// # Examples
///
/// ```
/// use u_subtour::program::{GoodLpSolver, IntegerProgram, IpSolver, LinearConstraint, SolverConfig};
///
/// let mut ip = IntegerProgram::new("pick-one");
/// let a = ip.add_binary("a");
/// let b = ip.add_binary("b");
/// ip.set_objective(vec![(a, 3.0), (b, 2.0)]);
/// ip.add_constraint(LinearConstraint::greater_equal("pick", vec![(a, 1.0), (b, 1.0)], 1.0));
///
/// let sol = GoodLpSolver::new().solve(&ip, &SolverConfig::default());
/// assert!(sol.is_optimal());
/// assert!((sol.objective_value.unwrap() - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    pub fn new() -> Self {
        Self
    }
}

fn linear_expression(terms: &[(super::VarId, f64)], handles: &[Variable]) -> Expression {
    terms.iter().map(|&(v, c)| c * handles[v.index()]).sum()
}

fn to_good_lp(constraint: &LinearConstraint, handles: &[Variable]) -> good_lp::Constraint {
    let lhs = linear_expression(&constraint.terms, handles);
    match constraint.sense {
        Sense::LessEqual => constraint::leq(lhs, constraint.rhs),
        Sense::Equal => constraint::eq(lhs, constraint.rhs),
        Sense::GreaterEqual => constraint::geq(lhs, constraint.rhs),
    }
}

fn log_model(program: &IntegerProgram) {
    info!(
        "{}: {} variables, {} constraints",
        program.name,
        program.num_variables(),
        program.num_constraints()
    );
    for c in program.constraints() {
        info!("  {c}");
    }
}

impl IpSolver for GoodLpSolver {
    fn solve(&self, program: &IntegerProgram, config: &SolverConfig) -> IpSolution {
        if let Err(reason) = program.validate() {
            return IpSolution::failed(SolverStatus::Unavailable)
                .with_message(format!("invalid model: {reason}"));
        }
        if config.time_limit.is_some() {
            debug!("microlp has no time limit; ignoring it");
        }

        let start_time = Instant::now();

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = program
            .variables()
            .iter()
            .map(|def| match def.kind {
                VarKind::Binary => vars.add(variable().binary()),
                VarKind::Continuous { lower, upper } => vars.add(variable().min(lower).max(upper)),
            })
            .collect();

        if config.verbose {
            log_model(program);
        }

        let objective = linear_expression(program.objective(), &handles);
        let mut model = vars.minimise(objective).using(microlp);
        for c in program.constraints() {
            model = model.with(to_good_lp(c, &handles));
        }

        let outcome = model.solve();
        let solve_time_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok(solution) => {
                let values: Vec<f64> = handles.iter().map(|&h| solution.value(h)).collect();
                let objective_value = program.objective_value(&values);
                debug!(
                    "{}: solved {} vars / {} constraints in {} ms, objective {:.4}",
                    program.name,
                    program.num_variables(),
                    program.num_constraints(),
                    solve_time_ms,
                    objective_value
                );
                let mut sol = IpSolution::optimal(values, objective_value);
                sol.solve_time_ms = solve_time_ms;
                sol
            }
            Err(ResolutionError::Infeasible) => {
                let mut sol = IpSolution::failed(SolverStatus::Infeasible)
                    .with_message("microlp: problem is infeasible");
                sol.solve_time_ms = solve_time_ms;
                sol
            }
            Err(err) => {
                warn!("{}: microlp failed: {err}", program.name);
                let mut sol = IpSolution::failed(SolverStatus::Unavailable).with_message(err.to_string());
                sol.solve_time_ms = solve_time_ms;
                sol
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::VarId;

    #[test]
    fn test_knapsack() {
        // max 5a + 4b + 3c  s.t. 2a + 3b + c <= 5
        let mut ip = IntegerProgram::new("knapsack");
        let a = ip.add_binary("a");
        let b = ip.add_binary("b");
        let c = ip.add_binary("c");
        ip.set_objective(vec![(a, -5.0), (b, -4.0), (c, -3.0)]);
        ip.add_constraint(LinearConstraint::less_equal(
            "weight",
            vec![(a, 2.0), (b, 3.0), (c, 1.0)],
            5.0,
        ));

        let sol = GoodLpSolver::new().solve(&ip, &SolverConfig::default());
        assert!(sol.is_optimal());
        // a + c = 8 < a + b = 9
        assert!((sol.objective_value.unwrap() + 9.0).abs() < 1e-6);
        assert!(sol.values[0] > 0.5);
        assert!(sol.values[1] > 0.5);
        assert!(sol.values[2] < 0.5);
    }

    #[test]
    fn test_verbose_solve_same_outcome() {
        let mut ip = IntegerProgram::new("pick-one");
        let a = ip.add_binary("a");
        let b = ip.add_binary("b");
        ip.set_objective(vec![(a, 3.0), (b, 2.0)]);
        ip.add_constraint(LinearConstraint::greater_equal("pick", vec![(a, 1.0), (b, 1.0)], 1.0));

        let quiet = GoodLpSolver::new().solve(&ip, &SolverConfig::default());
        let verbose = GoodLpSolver::new().solve(&ip, &SolverConfig::default().with_verbose(true));
        assert!(verbose.is_optimal());
        assert_eq!(quiet.objective_value, verbose.objective_value);
    }

    #[test]
    fn test_infeasible() {
        let mut ip = IntegerProgram::new("infeasible");
        let a = ip.add_binary("a");
        let b = ip.add_binary("b");
        ip.set_objective(vec![(a, 1.0)]);
        ip.add_constraint(LinearConstraint::greater_equal("both", vec![(a, 1.0), (b, 1.0)], 3.0));

        let sol = GoodLpSolver::new().solve(&ip, &SolverConfig::default());
        assert_eq!(sol.status, SolverStatus::Infeasible);
        assert!(sol.values.is_empty());
    }

    #[test]
    fn test_continuous_variable() {
        let mut ip = IntegerProgram::new("mixed");
        let x = ip.add_binary("x");
        let u = ip.add_continuous("u", 1.0, 10.0);
        ip.set_objective(vec![(u, 1.0), (x, 2.0)]);
        ip.add_constraint(LinearConstraint::greater_equal(
            "link",
            vec![(u, 1.0), (x, 5.0)],
            4.0,
        ));

        let sol = GoodLpSolver::new().solve(&ip, &SolverConfig::default());
        assert!(sol.is_optimal());
        // x = 0, u = 4 costs 4; x = 1, u = 1 costs 3
        assert!((sol.objective_value.unwrap() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_program_reported_unavailable() {
        let mut ip = IntegerProgram::new("broken");
        ip.add_binary("a");
        ip.set_objective(vec![(VarId(3), 1.0)]);

        let sol = GoodLpSolver::new().solve(&ip, &SolverConfig::default());
        assert_eq!(sol.status, SolverStatus::Unavailable);
        assert!(sol.message.unwrap().starts_with("invalid model"));
    }
}
