/*!
Random k-CNF instances for benchmarking.
*/

use rand::{seq::index::sample, Rng};

use crate::formula::{Clause, Cnf, FormulaError};

/// Draws `num_clauses` clauses, each over `width` distinct variables with
/// uniformly random polarity. `width` is clamped to `num_variables`.
pub fn random_cnf<R: Rng>(
    rng: &mut R,
    num_variables: usize,
    num_clauses: usize,
    width: usize,
) -> Result<Cnf, FormulaError> {
    let mut cnf = Cnf::try_new(num_variables)?;
    let width = width.min(num_variables);

    for _ in 0..num_clauses {
        let literals = sample(rng, num_variables, width)
            .into_iter()
            .map(|index| {
                let id = index as i64 + 1;
                if rng.gen_bool(0.5) {
                    id
                } else {
                    -id
                }
            })
            .collect::<Vec<_>>();
        cnf.add_clause(Clause::from_dimacs(&literals)?)?;
    }

    Ok(cnf)
}
