use std::fmt::Display;

use crate::assignment::Assignment;
use crate::formula::{Cnf, Model};

use super::{Solution, Solver};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BruteForceStats {
    /// Number of assignments evaluated.
    pub evaluated: u64,
}

impl Display for BruteForceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evaluated: {}", self.evaluated)
    }
}

/// Exhaustive search over all `2^n` assignments, from all-false to all-true
/// in binary counting order. Used as a correctness oracle.
#[derive(Debug)]
pub struct BruteForceSolver {
    formula: Cnf,
}

impl Solver for BruteForceSolver {
    type Stats = BruteForceStats;

    fn new(formula: Cnf) -> Self {
        BruteForceSolver { formula }
    }

    fn solve(self) -> Solution<BruteForceStats> {
        let mut stats = BruteForceStats::default();
        let mut candidate = Assignment::uniform(self.formula.num_variables(), false);

        loop {
            stats.evaluated += 1;
            if self.formula.evaluate(&candidate) {
                debug!(
                    "Brute force found {} after {} evaluations",
                    candidate, stats.evaluated
                );
                return Solution {
                    model: Some(Model::new(self.formula, candidate)),
                    stats,
                };
            }

            if !candidate.increment() {
                break;
            }
        }

        debug!("Brute force exhausted {} assignments", stats.evaluated);
        Solution { model: None, stats }
    }
}
