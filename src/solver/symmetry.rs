use std::fmt::Display;

use crate::assignment::{Assignment, VisitedSet};
use crate::formula::{Cnf, Model};

use super::{Solution, Solver};

mod activation;
mod backflow;
mod class;

pub use activation::{activation_profile, ClauseSet};
pub use backflow::backflow;
pub use class::{generate_symmetry_class, jump_size, SymmetryClass};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymmetryConfig {
    /// Consecutive fruitless levels before jumping ahead.
    pub max_sink: usize,
    /// Round limit of the backflow search.
    pub max_layers: usize,
    /// Return the backflow result instead of the first solution when backflow
    /// finds one. When disabled, backflow is not run at all.
    pub substitute_backflow: bool,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        SymmetryConfig {
            max_sink: 3,
            max_layers: 4,
            substitute_backflow: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of distinct assignments evaluated by level enumeration.
    pub evaluated: u64,
    /// Levels in the order they were enumerated.
    pub symmetry_levels: Vec<usize>,
    pub jumps: u64,
    pub backflows: u64,
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "evaluated: {}, levels: {:?}, jumps: {}, backflows: {}",
            self.evaluated, self.symmetry_levels, self.jumps, self.backflows
        )
    }
}

/// Samples assignments level by level around the all-true and all-false
/// baselines, jumping over levels after `max_sink` fruitless ones in a row.
#[derive(Debug)]
pub struct SymmetrySolver {
    formula: Cnf,
    config: SymmetryConfig,
}

impl SymmetrySolver {
    pub fn with_config(formula: Cnf, config: SymmetryConfig) -> Self {
        SymmetrySolver { formula, config }
    }

    /// Scans one level and returns the first satisfying assignment in
    /// generation order.
    fn scan_level(
        &self,
        level: usize,
        visited: &mut VisitedSet,
        stats: &mut SearchStats,
    ) -> Option<Assignment> {
        let num_variables = self.formula.num_variables();

        for candidate in SymmetryClass::new(num_variables, level) {
            if !visited.insert(&candidate) {
                continue;
            }

            stats.evaluated += 1;
            if self.formula.evaluate(&candidate) {
                return Some(candidate);
            }
        }

        None
    }

    /// Optionally replaces a found solution with one reached by backflow.
    fn refine(
        &self,
        solution: Assignment,
        visited: &mut VisitedSet,
        stats: &mut SearchStats,
    ) -> Assignment {
        if !self.config.substitute_backflow {
            return solution;
        }

        stats.backflows += 1;
        match backflow(&self.formula, &solution, visited, self.config.max_layers) {
            Some(recovered) => {
                debug!("Backflow replaced {} with {}", solution, recovered);
                recovered
            }
            None => solution,
        }
    }
}

impl Solver for SymmetrySolver {
    type Stats = SearchStats;

    fn new(formula: Cnf) -> Self {
        SymmetrySolver::with_config(formula, SymmetryConfig::default())
    }

    fn solve(self) -> Solution<SearchStats> {
        let num_variables = self.formula.num_variables();
        let mut visited = VisitedSet::new();
        let mut stats = SearchStats::default();

        if num_variables == 0 {
            // No level exists; the empty assignment is the only candidate.
            let empty = Assignment::uniform(0, false);
            let model = if self.formula.evaluate(&empty) {
                Some(Model::new(self.formula, empty))
            } else {
                None
            };
            return Solution { model, stats };
        }

        let mut level = 1;
        let mut sink_count = 0;

        while level <= num_variables {
            stats.symmetry_levels.push(level);

            if let Some(solution) = self.scan_level(level, &mut visited, &mut stats) {
                debug!(
                    "Level {} yielded {} after {} evaluations",
                    level, solution, stats.evaluated
                );
                let solution = self.refine(solution, &mut visited, &mut stats);
                return Solution {
                    model: Some(Model::new(self.formula, solution)),
                    stats,
                };
            }

            sink_count += 1;
            if sink_count >= self.config.max_sink {
                // A zero stride happens only at the last level. The rescan
                // counts as a new sink, so it ends the loop unless every
                // level jumps (max_sink <= 1).
                let mut stride = jump_size(num_variables, level);
                if stride == 0 && self.config.max_sink <= 1 {
                    stride = 1;
                }
                debug!(
                    "Level {} is sink #{}, jumping {} levels ahead",
                    level, sink_count, stride
                );
                level += stride;
                sink_count = 0;
                stats.jumps += 1;
            } else {
                debug!("Level {} is sink #{}", level, sink_count);
                level += 1;
            }
        }

        debug!(
            "Symmetry search exhausted after {} evaluations",
            stats.evaluated
        );
        Solution { model: None, stats }
    }
}
