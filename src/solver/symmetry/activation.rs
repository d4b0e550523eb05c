use std::collections::BTreeSet;

use crate::assignment::Assignment;
use crate::formula::{ClauseIdx, Cnf};

pub type ClauseSet = BTreeSet<ClauseIdx>;

/// Returns the clauses satisfied by a strict majority of `batch`.
/// An empty batch activates nothing.
pub fn activation_profile(formula: &Cnf, batch: &[Assignment]) -> ClauseSet {
    let threshold = batch.len() / 2;

    formula
        .clauses()
        .iter_enumerated()
        .filter(|(_, clause)| {
            let satisfied = batch
                .iter()
                .filter(|assignment| clause.evaluate(assignment))
                .count();
            satisfied > threshold
        })
        .map(|(idx, _)| idx)
        .collect()
}
