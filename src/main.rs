//! Command-line front end: `tourist solve -f instance.tsp`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};
use tourist::instance::read_problem_file;
use tourist::sa::{AnnealingParams, StopPolicy};

fn cli() -> Command {
    Command::new("tourist")
        .about("Traveling Salesman Problem solver using simulated annealing")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Solve TSP for a given problem instance provided as a text file")
                .arg(
                    arg!(-f --file <FILE> "File with TSP instance")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-t --temp [TEMP] "Initial temperature")
                        .default_value("10.0")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(-b --beta [BETA] "Multiplier reducing the temperature every iteration")
                        .default_value("0.99981")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(-g --goal [GOAL] "Stop once the tour costs at most this much")
                        .default_value("0.0")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(-i --iterations [ITERATIONS] "Iterations to run")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-o --output [OUTPUT] "Report progress every this many iterations")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for a reproducible run")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(arg!(-s --solution "Print the final visiting order"))
                .arg(arg!(--best "Report the best tour seen instead of the last one")),
        )
}

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let matches = cli().get_matches();

    let outcome = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(sub_m, &mut std::io::stdout().lock()),
        _ => Err(anyhow!("Invalid subcommand")),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn required<T: Clone + Send + Sync + 'static>(args: &ArgMatches, id: &str) -> Result<T> {
    args.get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow!("missing --{id}"))
}

/// Runs the `solve` subcommand. Nothing is written to `out` unless the
/// whole run succeeds.
fn solve(args: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let file: PathBuf = required(args, "file")?;
    let temperature: f64 = required(args, "temp")?;
    let beta: f64 = required(args, "beta")?;
    let goal: f64 = required(args, "goal")?;
    let iterations: usize = required(args, "iterations")?;
    let output: usize = required(args, "output")?;
    let seed = args.get_one::<u64>("seed").copied();

    let instance = read_problem_file(&file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    log::info!(
        "loaded '{}' with {} points",
        instance.name(),
        instance.dimension()
    );

    let params = AnnealingParams::new(temperature, beta)?;
    let stop = StopPolicy::new(goal, iterations, output)?;
    let result = tourist::solve(&instance, &params, &stop, seed)?;

    log::info!(
        "stopped after {} iterations ({:?}), accepted {} moves, best cost {:.6}",
        result.iterations,
        result.stop_reason,
        result.accepted_moves,
        result.best_cost
    );

    let (route, cost) = if args.get_flag("best") {
        (&result.best, result.best_cost)
    } else {
        (&result.route, result.cost)
    };

    writeln!(out, "Final Cost: {cost:.6}")?;
    if args.get_flag("solution") {
        writeln!(out, "Final Solution: {:?}", route.order())?;
    }
    Ok(())
}
