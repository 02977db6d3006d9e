//! Command-line TSP solver.
//!
//! ```text
//! u-subtour instance.json
//! u-subtour --random 15 --seed 3 --method mtz --json
//! ```

mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info};

use u_subtour::cutloop::{solve_tsp, CutLoopConfig};
use u_subtour::error::{CutLoopError, InstanceError};
use u_subtour::formulation::{solve_static, Formulation};
use u_subtour::instance::TspInstance;
use u_subtour::models::Tour;
use u_subtour::program::{GoodLpSolver, SolverConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Lazy subtour elimination
    Lazy,
    /// Miller-Tucker-Zemlin
    Mtz,
    /// Single-commodity flow
    Flow,
    /// All subtour constraints up front (small instances only)
    Dfj,
}

#[derive(Debug, Parser)]
#[command(name = "u-subtour", version, about = "Exact TSP solver by subtour elimination")]
struct Args {
    /// JSON instance file with `n` and `dist` (or `xCord`/`yCord`)
    #[arg(required_unless_present = "random", conflicts_with = "random")]
    instance: Option<PathBuf>,

    /// Solve a random Euclidean instance with this many customers
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Method::Lazy)]
    method: Method,

    /// Maximum solver calls of the lazy method
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Wall-clock budget in seconds
    #[arg(long)]
    time_limit_secs: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Instance(#[from] InstanceError),
    #[error(transparent)]
    Solve(#[from] CutLoopError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid time limit: {0}")]
    TimeLimit(f64),
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init_logger(args.verbose, args.quiet) {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Solve(e)) if e.best_solution().is_some() => {
            error!("{e}");
            if let Some(best) = e.best_solution() {
                println!(
                    "best relaxation: objective {:.4}, {} cycles {:?}",
                    best.objective_value(),
                    best.num_cycles(),
                    best.cycles()
                );
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let instance = match (&args.instance, args.random) {
        (_, Some(n)) => TspInstance::random_euclidean(n, args.seed),
        (Some(path), None) => TspInstance::from_path(path)?,
        (None, None) => return Err(InstanceError::invalid("no instance given").into()),
    };
    let matrix = instance.to_cost_matrix()?;
    info!("instance: {} nodes", matrix.size());

    let time_limit = args
        .time_limit_secs
        .map(|secs| Duration::try_from_secs_f64(secs).map_err(|_| CliError::TimeLimit(secs)))
        .transpose()?;
    let mut solver_config = SolverConfig::default().with_verbose(args.verbose > 1);
    if let Some(limit) = time_limit {
        solver_config = solver_config.with_time_limit(limit);
    }
    let solver = GoodLpSolver::new();

    let formulation = match args.method {
        Method::Lazy => {
            let mut config = CutLoopConfig::default().with_solver_config(solver_config);
            if let Some(n) = args.max_iterations {
                config = config.with_max_iterations(n);
            }
            if let Some(limit) = time_limit {
                config = config.with_time_limit(limit);
            }

            let result = solve_tsp(&matrix, &solver, &config)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{:>10} {:>15} {:>20}", "iteration", "cuts", "objective");
                for record in &result.history {
                    println!("{record}");
                }
                print_tour(&result.tour);
                println!(
                    "{} iterations, {} cuts, {:.2}s",
                    result.iterations,
                    result.cuts_added,
                    result.elapsed.as_secs_f64()
                );
            }
            return Ok(());
        }
        Method::Mtz => Formulation::Mtz,
        Method::Flow => Formulation::SingleCommodityFlow,
        Method::Dfj => Formulation::FullDfj,
    };

    let result = solve_static(&matrix, formulation, &solver, &solver_config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_tour(&result.tour);
        println!(
            "{} variables, {} constraints, {:.2}s",
            result.num_variables,
            result.num_constraints,
            result.elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn print_tour(tour: &Tour) {
    println!("tour: {tour}");
    println!("cost: {:.4}", tour.cost());
}
