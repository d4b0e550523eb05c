/*!
A module to represent conjunctive normal form formula and to evaluate it
against a complete assignment.
*/

use std::{convert::TryFrom, fmt::Display, num::NonZeroU32};

use typed_index_collections::{TiSlice, TiVec};

use crate::assignment::Assignment;
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum FormulaError {
    #[snafu(display(
        "Literal {} refers to a variable outside of the declared {} variables",
        literal,
        num_variables
    ))]
    OutOfRangeVariable {
        literal: Literal,
        num_variables: usize,
    },
    #[snafu(display("Invalid formula: {}", reason))]
    InvalidFormula { reason: String },
}

/// Newtype wrapper for variable ID.
/// Invariant: 0 < ID <= MAX_VARIABLE_ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(NonZeroU32);

impl Variable {
    pub const MAX_VARIABLE_ID: usize = std::u32::MAX as usize;
}

impl Variable {
    pub fn index(&self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Creates a variable from a raw index.
    /// Returns `None` if the index is invalid.
    pub fn from_index(index: usize) -> Option<Self> {
        let id = index.checked_add(1)?;
        if id > Variable::MAX_VARIABLE_ID {
            return None;
        }
        Some(Variable(NonZeroU32::new(u32::try_from(id).ok()?)?))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable with the polarity it must take to satisfy its clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    variable: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(variable: Variable, positive: bool) -> Self {
        Literal { variable, positive }
    }

    /// Converts a signed DIMACS-style integer into a literal.
    pub fn from_dimacs(value: i64) -> Result<Self, FormulaError> {
        ensure!(
            value != 0,
            InvalidFormula {
                reason: "literal 0 does not name a variable",
            }
        );

        let variable = usize::try_from(value.unsigned_abs())
            .ok()
            .and_then(|id| Variable::from_index(id - 1))
            .with_context(|| InvalidFormula {
                reason: format!("literal {} exceeds the supported variable range", value),
            })?;

        Ok(Literal::new(variable, value > 0))
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn positive(&self) -> bool {
        self.positive
    }

    pub fn index(&self) -> usize {
        self.variable.index()
    }

    /// Returns true if the assigned bit matches the required polarity.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        assignment.get(self.index()) == self.positive
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "¬" }, self.variable)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            variable: self.variable,
            positive: !self.positive,
        }
    }
}

/// Disjunction of literals. Literal order is kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn from_dimacs(values: &[i64]) -> Result<Self, FormulaError> {
        let literals = values
            .iter()
            .map(|&value| Literal::from_dimacs(value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Clause::new(literals))
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// An empty clause is never satisfied.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.iter().any(|literal| literal.evaluate(assignment))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;

        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, " ∨ {}", literal)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Stable position of a clause inside its formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseIdx(usize);

impl From<usize> for ClauseIdx {
    fn from(index: usize) -> Self {
        ClauseIdx(index)
    }
}

impl From<ClauseIdx> for usize {
    fn from(index: ClauseIdx) -> Self {
        index.0
    }
}

/// Formula representation in Conjunctive Normal Form.
/// Invariant: every literal refers to a variable below `num_variables`.
#[derive(Debug, Clone)]
pub struct Cnf {
    num_variables: usize,
    clauses: TiVec<ClauseIdx, Clause>,
}

impl Cnf {
    pub fn new(num_variables: usize) -> Self {
        assert!(num_variables <= Variable::MAX_VARIABLE_ID);

        Cnf {
            num_variables,
            clauses: TiVec::new(),
        }
    }

    /// Same as `new`, but reports an unrepresentable variable count as an error.
    pub fn try_new(num_variables: usize) -> Result<Self, FormulaError> {
        ensure!(
            num_variables <= Variable::MAX_VARIABLE_ID,
            InvalidFormula {
                reason: format!(
                    "{} variables exceed the maximum of {}",
                    num_variables,
                    Variable::MAX_VARIABLE_ID
                ),
            }
        );
        Ok(Cnf::new(num_variables))
    }

    /// Builds a formula from signed integer clauses, validating every literal.
    pub fn from_dimacs<C>(num_variables: usize, clauses: C) -> Result<Self, FormulaError>
    where
        C: IntoIterator,
        C::Item: AsRef<[i64]>,
    {
        let mut cnf = Cnf::try_new(num_variables)?;
        for values in clauses {
            cnf.add_clause(Clause::from_dimacs(values.as_ref())?)?;
        }
        Ok(cnf)
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn clauses(&self) -> &TiSlice<ClauseIdx, Clause> {
        &self.clauses
    }

    pub fn add_clause(&mut self, clause: Clause) -> Result<ClauseIdx, FormulaError> {
        for literal in clause.iter() {
            ensure!(
                literal.index() < self.num_variables,
                OutOfRangeVariable {
                    literal,
                    num_variables: self.num_variables,
                }
            );
        }

        Ok(self.clauses.push_and_get_key(clause))
    }

    /// An empty formula is satisfied by any assignment.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        debug_assert_eq!(assignment.len(), self.num_variables);
        self.clauses.iter().all(|clause| clause.evaluate(assignment))
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} variables (", self.num_variables)?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, " ∧ {}", clause)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Represents a satisfying assignment for a formula.
#[derive(Debug)]
pub struct Model {
    formula: Cnf,
    assignment: Assignment,
}

impl Model {
    /// Creates a new model from a formula and an assignment.
    ///
    /// # Panics
    ///
    /// Panics when `assignment` has the wrong length or does not satisfy `formula`.
    pub fn new(formula: Cnf, assignment: Assignment) -> Self {
        assert!(assignment.len() == formula.num_variables());
        assert!(formula.evaluate(&assignment));

        Model {
            formula,
            assignment,
        }
    }

    pub fn formula(&self) -> &Cnf {
        &self.formula
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model for {}\nAssignment:", self.formula)?;
        for (idx, val) in self.assignment.iter().enumerate() {
            write!(f, "\n  x{}: {}", idx + 1, val as u8)?;
        }

        Ok(())
    }
}
