/*!
Timing comparison between the symmetry solver and the brute-force oracle.
*/

use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crate::formula::Cnf;
use crate::parser::{self, parse_file};
use crate::prelude::*;
use crate::solver::{
    BruteForceSolver, BruteForceStats, SearchStats, Solution, Solver, SymmetryConfig,
    SymmetrySolver,
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("'{}' is not a directory", path.display()))]
    NotADirectory { path: PathBuf },
    #[snafu(display("No .cnf files found in '{}'", path.display()))]
    NoCnfFiles { path: PathBuf },
    #[snafu(display("Failed to list directory '{}'", path.display()))]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to load '{}'", path.display()))]
    Parse {
        path: PathBuf,
        source: parser::Error,
    },
}

/// A solver run together with its wall-clock time.
#[derive(Debug)]
pub struct Timed<S> {
    pub solution: Solution<S>,
    pub elapsed: Duration,
}

fn timed<T: Solver>(solver: T) -> Timed<T::Stats> {
    let start = Instant::now();
    let solution = solver.solve();
    Timed {
        solution,
        elapsed: start.elapsed(),
    }
}

#[derive(Debug)]
pub struct Comparison {
    pub name: String,
    pub num_variables: usize,
    pub num_clauses: usize,
    pub symmetry: Timed<SearchStats>,
    pub brute_force: Timed<BruteForceStats>,
}

impl Comparison {
    /// Returns true if both solvers reached the same verdict.
    pub fn agrees(&self) -> bool {
        self.symmetry.solution.is_sat() == self.brute_force.solution.is_sat()
    }
}

/// Runs the symmetry solver and then the brute-force solver on `formula`.
pub fn compare(name: impl Into<String>, formula: Cnf, config: SymmetryConfig) -> Comparison {
    let name = name.into();
    let num_variables = formula.num_variables();
    let num_clauses = formula.clauses().len();
    info!(
        "Running {} | Variables: {} | Clauses: {}",
        name, num_variables, num_clauses
    );

    let symmetry = timed(SymmetrySolver::with_config(formula.clone(), config));
    let brute_force = timed(BruteForceSolver::new(formula));

    let comparison = Comparison {
        name,
        num_variables,
        num_clauses,
        symmetry,
        brute_force,
    };

    if !comparison.agrees() {
        warn!(
            "Verdicts differ on {}: symmetry {}, brute force {}",
            comparison.name,
            verdict(comparison.symmetry.solution.is_sat()),
            verdict(comparison.brute_force.solution.is_sat()),
        );
    }

    comparison
}

fn verdict(sat: bool) -> &'static str {
    if sat {
        "SAT"
    } else {
        "UNSAT"
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parses and compares a single DIMACS file.
pub fn run_file(path: impl AsRef<Path>, config: SymmetryConfig) -> Result<Comparison, Error> {
    let path = path.as_ref();
    let formula = parse_file(path).context(Parse {
        path: path.to_owned(),
    })?;
    Ok(compare(display_name(path), formula, config))
}

/// Compares both solvers on every `*.cnf` file of `dir`, in file name order.
pub fn run_dir(dir: impl AsRef<Path>, config: SymmetryConfig) -> Result<Summary, Error> {
    let dir = dir.as_ref();
    ensure!(
        dir.is_dir(),
        NotADirectory {
            path: dir.to_owned()
        }
    );

    let mut files = fs::read_dir(dir)
        .context(ReadDir {
            path: dir.to_owned(),
        })?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .context(ReadDir {
            path: dir.to_owned(),
        })?;
    files.retain(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "cnf"));
    files.sort();

    ensure!(
        !files.is_empty(),
        NoCnfFiles {
            path: dir.to_owned()
        }
    );

    let comparisons = files
        .iter()
        .map(|path| run_file(path, config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Summary { comparisons })
}

fn seconds(duration: Duration) -> f64 {
    duration.as_secs_f64()
}

impl Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Running: {} | Variables: {} | Clauses: {}",
            self.name, self.num_variables, self.num_clauses
        )?;
        writeln!(f, "--- Symmetry Solver ---")?;
        writeln!(f, "Solved: {}", self.symmetry.solution.is_sat())?;
        writeln!(f, "Stats: {}", self.symmetry.solution.stats)?;
        writeln!(f, "Time: {:.4}s", seconds(self.symmetry.elapsed))?;
        writeln!(f, "--- Brute Force Solver ---")?;
        writeln!(f, "Solved: {}", self.brute_force.solution.is_sat())?;
        writeln!(f, "Stats: {}", self.brute_force.solution.stats)?;
        write!(f, "Time: {:.4}s", seconds(self.brute_force.elapsed))
    }
}

/// Aggregated comparisons over a batch of formulas.
#[derive(Debug, Default)]
pub struct Summary {
    pub comparisons: Vec<Comparison>,
}

impl Summary {
    pub fn total_symmetry_time(&self) -> Duration {
        self.comparisons.iter().map(|c| c.symmetry.elapsed).sum()
    }

    pub fn total_brute_force_time(&self) -> Duration {
        self.comparisons.iter().map(|c| c.brute_force.elapsed).sum()
    }

    pub fn disagreements(&self) -> usize {
        self.comparisons.iter().filter(|c| !c.agrees()).count()
    }

    fn average(&self, total: Duration) -> f64 {
        if self.comparisons.is_empty() {
            0.0
        } else {
            seconds(total) / self.comparisons.len() as f64
        }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(50);
        let symmetry = self.total_symmetry_time();
        let brute_force = self.total_brute_force_time();

        writeln!(f, "{}", rule)?;
        writeln!(f, "=== Overall Statistics ===")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total files processed: {}", self.comparisons.len())?;
        writeln!(f, "Verdict disagreements: {}", self.disagreements())?;
        writeln!(
            f,
            "Average Symmetry Solver time: {:.4}s",
            self.average(symmetry)
        )?;
        writeln!(
            f,
            "Average Brute Force time: {:.4}s",
            self.average(brute_force)
        )?;
        writeln!(f, "Total time - Symmetry: {:.4}s", seconds(symmetry))?;
        writeln!(f, "Total time - Brute Force: {:.4}s", seconds(brute_force))?;
        write!(f, "{}", rule)
    }
}
