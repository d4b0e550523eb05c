use crate::assignment::Assignment;

/// Size-k subsets of `0..n` in lexicographic order.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            indices: (0..k).collect(),
            started: false,
            exhausted: k > n,
        }
    }

    fn next_combination(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        // Rightmost position that has not reached its maximum value `n - k + i`.
        match (0..k).rev().find(|&i| self.indices[i] != i + self.n - k) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                Some(&self.indices)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

/// Lazily enumerates the symmetry class at level `k`: every assignment at
/// Hamming distance `k` from the all-true baseline, then every assignment at
/// distance `k` from the all-false baseline.
///
/// Yields exactly `2 * C(n, k)` assignments. Nothing is deduplicated, so an
/// assignment reachable from both baselines is yielded twice.
pub struct SymmetryClass {
    num_variables: usize,
    level: usize,
    majority: Option<bool>,
    combinations: Combinations,
}

impl SymmetryClass {
    pub fn new(num_variables: usize, level: usize) -> Self {
        SymmetryClass {
            num_variables,
            level,
            majority: Some(true),
            combinations: Combinations::new(num_variables, level),
        }
    }
}

impl Iterator for SymmetryClass {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        loop {
            let majority = self.majority?;

            if let Some(flips) = self.combinations.next_combination() {
                let mut assignment = Assignment::uniform(self.num_variables, majority);
                for &index in flips {
                    assignment.flip(index);
                }
                return Some(assignment);
            }

            self.majority = if majority { Some(false) } else { None };
            self.combinations = Combinations::new(self.num_variables, self.level);
        }
    }
}

pub fn generate_symmetry_class(num_variables: usize, level: usize) -> Vec<Assignment> {
    SymmetryClass::new(num_variables, level).collect()
}

/// Level stride after repeated sinks: `ceil(log2(n - k + 1))`.
///
/// # Panics
///
/// Panics if `k > n`.
pub fn jump_size(num_variables: usize, level: usize) -> usize {
    assert!(level <= num_variables);

    let span = num_variables - level + 1;
    // ceil(log2(span)) is the bit length of span - 1
    (usize::BITS - (span - 1).leading_zeros()) as usize
}
