use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::formula::{Clause, Cnf, FormulaError, Variable};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while reading CNF file '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "Problem line '{}' is not of the form 'p cnf <num_variables> <num_clauses>'",
        line
    ))]
    MalformedProblemDefinition { line: String },
    #[snafu(display("No problem line and no clauses found"))]
    NoClauses,
    #[snafu(display("Invalid clause on line {}", line_number))]
    InvalidClause {
        line_number: usize,
        source: FormulaError,
    },
    #[snafu(display(
        "The number of clauses ({}) does not match the clauses number in the problem definition ({})",
        found,
        expected,
    ))]
    ClauseCountMismatch { expected: usize, found: usize },
}

struct ProblemDefinition {
    num_variables: usize,
    num_clauses: usize,
}

fn parse_problem_line(line: &str) -> Result<ProblemDefinition, Error> {
    let splitted = line.split_whitespace().collect::<Vec<_>>();

    // We only support CNF DIMACS format
    ensure!(
        splitted.len() == 4 && splitted[0] == "p" && splitted[1] == "cnf",
        MalformedProblemDefinition { line }
    );

    match (splitted[2].parse::<usize>(), splitted[3].parse::<usize>()) {
        (Ok(num_variables), Ok(num_clauses)) if num_variables <= Variable::MAX_VARIABLE_ID => {
            Ok(ProblemDefinition {
                num_variables,
                num_clauses,
            })
        }
        _ => MalformedProblemDefinition { line }.fail(),
    }
}

/// Parse a line to raw literals, dropping `0` terminators.
/// Returns `None` if any token is not an integer.
fn parse_line(line: &str) -> Option<Vec<i64>> {
    let mut literals = Vec::new();
    for token in line.split_whitespace() {
        let value = token.parse::<i64>().ok()?;
        if value != 0 {
            literals.push(value);
        }
    }
    Some(literals)
}

/// Parses CNF formula from DIMACS text.
///
/// The problem line is optional. Without it, the number of variables is the
/// largest variable mentioned by any clause.
pub fn parse_str(input: &str) -> Result<Cnf, Error> {
    let mut problem = None;
    let mut raw_clauses = Vec::new();

    for (line_index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            // empty line, comment
            continue;
        }
        if trimmed.starts_with('%') {
            // SATLIB end-of-data marker
            break;
        }
        if trimmed.starts_with('p') {
            problem = Some(parse_problem_line(trimmed)?);
            continue;
        }

        match parse_line(trimmed) {
            Some(literals) => raw_clauses.push((line_index + 1, literals)),
            None => warn!("Skipping invalid line {}: '{}'", line_index + 1, trimmed),
        }
    }

    let clauses = raw_clauses
        .into_iter()
        .map(|(line_number, literals)| {
            Clause::from_dimacs(&literals)
                .map(|clause| (line_number, clause))
                .context(InvalidClause { line_number })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let num_variables = match &problem {
        Some(problem) => problem.num_variables,
        None => {
            ensure!(!clauses.is_empty(), NoClauses);
            clauses
                .iter()
                .flat_map(|(_, clause)| clause.iter())
                .map(|literal| literal.index() + 1)
                .max()
                .unwrap_or(0)
        }
    };

    let mut cnf = Cnf::new(num_variables);
    for (line_number, clause) in clauses {
        cnf.add_clause(clause).context(InvalidClause { line_number })?;
    }

    if let Some(problem) = problem {
        ensure!(
            cnf.clauses().len() == problem.num_clauses,
            ClauseCountMismatch {
                found: cnf.clauses().len(),
                expected: problem.num_clauses,
            }
        );
    }

    Ok(cnf)
}

/// Parses CNF formula from a file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf, Error> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).context(IoError {
        path: path.to_owned(),
    })?;

    parse_str(&contents)
}
