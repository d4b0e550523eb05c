use crate::formula::{Cnf, Model};

mod brute_force;
mod symmetry;

pub use brute_force::{BruteForceSolver, BruteForceStats};
pub use symmetry::{
    activation_profile, backflow, generate_symmetry_class, jump_size, ClauseSet, SearchStats,
    SymmetryClass, SymmetryConfig, SymmetrySolver,
};

pub trait Solver {
    /// Counters collected while solving.
    type Stats;

    /// Creates a new solver instance.
    fn new(formula: Cnf) -> Self;

    /// Solves a CNF SAT problem with the solver.
    /// Exhausting the search is reported as a solution without a model.
    fn solve(self) -> Solution<Self::Stats>;
}

/// Result of a single solver run.
#[derive(Debug)]
pub struct Solution<S> {
    /// `Some(Model)` if a satisfying assignment was found, `None` otherwise.
    pub model: Option<Model>,
    pub stats: S,
}

impl<S> Solution<S> {
    pub fn is_sat(&self) -> bool {
        self.model.is_some()
    }
}
