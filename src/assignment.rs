/*!
Complete truth assignments and the visited set used to avoid re-evaluating them.
*/

use std::{collections::HashSet, fmt::Display};

/// A complete assignment of `n` variables, addressed by variable index.
/// Invariant: the length never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    bits: Vec<bool>,
}

impl Assignment {
    /// Creates an assignment where every variable takes `value`.
    pub fn uniform(num_variables: usize, value: bool) -> Self {
        Assignment {
            bits: vec![value; num_variables],
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Number of variables assigned to true.
    pub fn weight(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Returns the assignments differing from `self` in exactly one bit,
    /// ordered by the flipped position.
    pub fn hamming_neighbors(&self) -> impl Iterator<Item = Assignment> + '_ {
        (0..self.len()).map(move |index| {
            let mut neighbor = self.clone();
            neighbor.flip(index);
            neighbor
        })
    }

    /// Advances to the next assignment in binary counting order, where the
    /// last variable is the least significant bit.
    /// Returns false once the all-true assignment wraps around.
    pub fn increment(&mut self) -> bool {
        for bit in self.bits.iter_mut().rev() {
            if *bit {
                *bit = false;
            } else {
                *bit = true;
                return true;
            }
        }

        false
    }

    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(&self.bits)
    }
}

impl From<Vec<bool>> for Assignment {
    fn from(bits: Vec<bool>) -> Self {
        Assignment { bits }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", bit as u8)?;
        }

        Ok(())
    }
}

const WORD_BITS: usize = 64;

/// Canonical fixed-width encoding of an assignment.
///
/// Bit `i` of the assignment is stored at bit `i % 64` of word `i / 64`, and
/// unused high bits of the last word are always zero. Two keys are equal iff
/// they encode assignments of the same length with the same bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssignmentKey {
    /// Up to 64 variables packed into a single word.
    Narrow { len: u8, word: u64 },
    Wide { len: usize, words: Box<[u64]> },
}

impl AssignmentKey {
    fn new(bits: &[bool]) -> Self {
        let mut words = vec![0u64; (bits.len() + WORD_BITS - 1) / WORD_BITS];
        for (index, &bit) in bits.iter().enumerate() {
            if bit {
                words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
            }
        }

        if bits.len() <= WORD_BITS {
            AssignmentKey::Narrow {
                len: bits.len() as u8,
                word: words.first().copied().unwrap_or(0),
            }
        } else {
            AssignmentKey::Wide {
                len: bits.len(),
                words: words.into_boxed_slice(),
            }
        }
    }
}

/// Assignments already evaluated during one solver run.
/// It only ever grows.
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: HashSet<AssignmentKey>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Marks the assignment as visited.
    /// Returns false if it was already visited.
    pub fn insert(&mut self, assignment: &Assignment) -> bool {
        self.keys.insert(assignment.key())
    }

    pub fn contains(&self, assignment: &Assignment) -> bool {
        self.keys.contains(&assignment.key())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
