use crate::assignment::{Assignment, VisitedSet};
use crate::formula::Cnf;

use super::activation::activation_profile;

/// Bounded breadth-first search over the single-flip neighbors of `solution`
/// for another satisfying assignment.
///
/// Each round expands every assignment of the current layer in flip order and
/// returns the first unvisited neighbor that satisfies `formula`. Neighbors
/// already in `visited` are skipped; all others are marked visited. The search
/// stops after `max_layers` rounds, on an empty frontier, or when a round's
/// activation profile equals the previous one.
pub fn backflow(
    formula: &Cnf,
    solution: &Assignment,
    visited: &mut VisitedSet,
    max_layers: usize,
) -> Option<Assignment> {
    let mut current_layer = vec![solution.clone()];
    let mut previous_profile = activation_profile(formula, &current_layer);

    for round in 0..max_layers {
        let mut next_layer = Vec::new();

        for config in &current_layer {
            for neighbor in config.hamming_neighbors() {
                if !visited.insert(&neighbor) {
                    continue;
                }
                if formula.evaluate(&neighbor) {
                    trace!("Backflow round {} found {}", round, neighbor);
                    return Some(neighbor);
                }
                next_layer.push(neighbor);
            }
        }

        if next_layer.is_empty() {
            trace!("Backflow round {} has an empty frontier", round);
            break;
        }

        let profile = activation_profile(formula, &next_layer);
        if profile == previous_profile {
            trace!(
                "Backflow round {} repeats the activation profile of {} clauses",
                round,
                profile.len()
            );
            break;
        }

        trace!(
            "Backflow round {} expanded {} assignments, {} clauses active",
            round,
            next_layer.len(),
            profile.len()
        );
        previous_profile = profile;
        current_layer = next_layer;
    }

    None
}
