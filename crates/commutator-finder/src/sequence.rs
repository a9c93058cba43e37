//! Canonical move sequence enumeration.
//!
//! Sequences are counted like a mixed-radix number in base 45 where the
//! first move is the least significant digit. Sequences with redundancy
//! are skipped: two adjacent turns of one layer (`R R'`), and adjacent
//! parallel layers out of ascending order (`R L` is kept as `L R`). That
//! leaves one representative for each class of equivalent sequences,
//! shortest first.

use crate::moves::{Move, MoveSequence, NUM_MOVES};

/// True if no adjacent pair of moves is redundant
pub fn is_canonical(moves: &[Move]) -> bool {
    moves.windows(2).all(|pair| {
        let (a, b) = (pair[0], pair[1]);
        !a.same_layer(b) && !(a.is_parallel_to(b) && a.layer() >= b.layer())
    })
}

/// Walks canonical sequences in a fixed order, starting at `L`
#[derive(Debug, Clone)]
pub struct SequenceEnumerator {
    current: MoveSequence,
}

impl Default for SequenceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceEnumerator {
    pub fn new() -> Self {
        let mut enumerator = Self {
            current: MoveSequence::new(),
        };
        enumerator.reset();
        enumerator
    }

    /// Back to the single move `L`
    pub fn reset(&mut self) {
        self.current.clear();
        self.current.push(Move::FIRST);
    }

    pub fn current(&self) -> &MoveSequence {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Step to the next canonical sequence
    pub fn advance(&mut self) {
        loop {
            self.increment();
            if is_canonical(self.current.as_slice()) {
                break;
            }
        }
    }

    /// Add one to the counter, growing the sequence on overflow
    fn increment(&mut self) {
        for slot in self.current.as_mut_slice() {
            match slot.successor() {
                Some(next) => {
                    *slot = next;
                    return;
                }
                None => *slot = Move::FIRST,
            }
        }
        self.current.push(Move::FIRST);
    }

    /// Advance past every sequence that starts or ends with a move
    /// parallel to `pivot`.
    ///
    /// Such sequences commute with the pivot on that side, so a commutator
    /// built from them collapses. When the last move is parallel the whole
    /// block of sequences sharing it is skipped at once.
    pub fn advance_skipping_pivot_adjacency(&mut self, pivot: Move) {
        self.advance();
        loop {
            let last_parallel = self
                .current
                .last()
                .is_some_and(|m| m.is_parallel_to(pivot));
            if last_parallel {
                let len = self.current.len();
                for slot in &mut self.current.as_mut_slice()[..len - 1] {
                    *slot = Move::LAST;
                }
                self.advance();
            }

            let first_parallel = self
                .current
                .first()
                .is_some_and(|m| m.is_parallel_to(pivot));
            if first_parallel {
                self.advance();
            }

            if !first_parallel && !last_parallel {
                break;
            }
        }
    }

    /// Rough share of the current length already enumerated, in percent.
    /// `None` below three moves, where enumeration is instant.
    pub fn progress(&self) -> Option<f64> {
        let moves = self.current.as_slice();
        let n = moves.len();
        if n < 3 {
            return None;
        }
        let base = NUM_MOVES as f64;
        let done = moves[n - 1].index() as f64 * base * base
            + moves[n - 2].index() as f64 * base
            + moves[n - 3].index() as f64;
        let total = base * base * base + base * base + base;
        Some(done / total * 100.0)
    }
}

/// Yields the current sequence, then advances. Never ends.
impl Iterator for SequenceEnumerator {
    type Item = MoveSequence;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.clone();
        self.advance();
        Some(current)
    }
}
