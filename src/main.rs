use std::{env::args, fmt::Display, path::Path};

use pretty_env_logger::formatted_builder;
use rand::{rngs::StdRng, SeedableRng};
use symsat::{
    bench, parser,
    parser::parse_file,
    prelude::*,
    random::random_cnf,
    report::Report,
    solver::{BruteForceSolver, Solver, SymmetryConfig, SymmetrySolver},
};

fn usage_string() -> String {
    format!(
        "Usage: {0} [options] <solver_name> check <file_name>
       {0} [options] bench <file_or_directory>
       {0} [options] random <num_variables> <num_clauses> [width] [seed]

solver_name: symmetry, brute

options:
    --max-sink=<n>    fruitless levels before jumping ahead (default 3)
    --max-layers=<n>  backflow round limit (default 4)
    --no-backflow     keep the first solution found by level enumeration",
        args().next().unwrap_or_else(|| "symsat".to_owned())
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown solver or command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Unknown option '{}'\n\n{}", option, usage_string()))]
    UnknownOption { option: String },
    #[snafu(display("Invalid number '{}'", value))]
    InvalidNumber {
        value: String,
        source: std::num::ParseIntError,
    },
    #[snafu(display("Failed to parse CNF"))]
    ParserError { source: parser::Error },
    #[snafu(display("Benchmark failed"))]
    BenchError { source: bench::Error },
    #[snafu(display("Failed to generate a random formula"))]
    RandomError {
        source: symsat::formula::FormulaError,
    },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
}

fn parse_number(value: &str) -> Result<usize, Error> {
    value.parse().context(InvalidNumber { value })
}

/// Consumes leading `--option` arguments.
fn parse_options(args: &mut Vec<String>) -> Result<SymmetryConfig, Error> {
    let mut config = SymmetryConfig::default();

    while let Some(option) = args.first().filter(|arg| arg.starts_with("--")).cloned() {
        args.remove(0);

        match option.split_once('=') {
            Some(("--max-sink", value)) => config.max_sink = parse_number(value)?,
            Some(("--max-layers", value)) => config.max_layers = parse_number(value)?,
            None if option == "--no-backflow" => config.substitute_backflow = false,
            _ => UnknownOption {
                option: option.clone(),
            }
            .fail()?,
        }
    }

    Ok(config)
}

fn check<T, F>(path: &Path, make_solver: F) -> Result<(), Error>
where
    T: Solver,
    T::Stats: Display,
    F: FnOnce(symsat::formula::Cnf) -> T,
{
    let formula = parse_file(path).context(ParserError)?;
    let solution = make_solver(formula).solve();

    match &solution.model {
        Some(model) => println!("SAT {}", model),
        None => println!("UNSAT"),
    }
    println!("{}", solution.stats);

    Ok(())
}

fn dispatch_check<T, F>(args: &[String], make_solver: F) -> Result<(), Error>
where
    T: Solver,
    T::Stats: Display,
    F: FnOnce(symsat::formula::Cnf) -> T,
{
    match args.get(0).map(|s| s.as_str()) {
        Some("check") => {
            let path = args.get(1).context(MissingArgument)?;
            check(path.as_ref(), make_solver)
        }
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail(),
        None => MissingArgument.fail(),
    }
}

fn bench_command(args: &[String], config: SymmetryConfig) -> Result<(), Error> {
    let path = Path::new(args.get(0).context(MissingArgument)?);

    if path.is_dir() {
        let summary = bench::run_dir(path, config).context(BenchError)?;
        for comparison in &summary.comparisons {
            println!("\n{}", comparison);
        }
        println!("\n{}\n", summary);
    } else {
        let comparison = bench::run_file(path, config).context(BenchError)?;
        println!("\n{}", comparison);
    }

    Ok(())
}

fn random_command(args: &[String], config: SymmetryConfig) -> Result<(), Error> {
    let num_variables = parse_number(args.get(0).context(MissingArgument)?)?;
    let num_clauses = parse_number(args.get(1).context(MissingArgument)?)?;
    let width = args.get(2).map(|s| parse_number(s)).transpose()?.unwrap_or(3);

    let mut rng = match args.get(3) {
        Some(seed) => StdRng::seed_from_u64(parse_number(seed)? as u64),
        None => StdRng::from_entropy(),
    };

    let formula =
        random_cnf(&mut rng, num_variables, num_clauses, width).context(RandomError)?;
    let name = format!("random-{}-{}-{}", num_variables, num_clauses, width);
    println!("\n{}", bench::compare(name, formula, config));

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        if cfg!(debug_assertions) {
            builder.parse_filters("symsat=debug");
        } else {
            builder.parse_filters("symsat=warn");
        }
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    // drop arg[0]
    let mut args: Vec<String> = args().skip(1).collect();
    let config = parse_options(&mut args)?;

    if args.is_empty() {
        println!("{}", usage_string());
        return Ok(());
    }

    let command = args.remove(0);
    match command.as_str() {
        "symmetry" => dispatch_check(&args, |formula| {
            SymmetrySolver::with_config(formula, config)
        })?,
        "brute" => dispatch_check(&args, BruteForceSolver::new)?,
        "bench" => bench_command(&args, config)?,
        "random" => random_command(&args, config)?,
        name => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
    }

    Ok(())
}
