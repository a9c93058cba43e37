//! Brute-force solver.
//!
//! Tries every canonical sequence in enumeration order, so the first
//! sequence that solves the state is also a shortest one. There is no
//! pruning beyond the enumerator's redundancy filter; cost grows by
//! roughly 40x per extra move.

use std::time::Instant;

use log::{debug, info, warn};

use crate::cube::CubeState;
use crate::moves::{MoveSequence, MAX_SEQUENCE_LEN};
use crate::sequence::SequenceEnumerator;

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Longest sequence to try
    pub max_depth: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_SEQUENCE_LEN,
        }
    }
}

/// Result of a solver run
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Shortest solving sequence, empty if the input was already solved
    pub solution: Option<MoveSequence>,
    /// Number of sequences applied
    pub sequences_tested: u64,
    /// Longest sequence length tried
    pub depth_reached: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl SolverResult {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Find the shortest sequence that solves `state`, trying every
/// sequence up to `config.max_depth` moves.
pub fn solve(state: &CubeState, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();

    if state.is_solved() {
        warn!("Nothing to solve: the cube is already solved");
        return SolverResult {
            solution: Some(MoveSequence::new()),
            sequences_tested: 0,
            depth_reached: 0,
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
    }

    let mut enumerator = SequenceEnumerator::new();
    let mut sequences_tested: u64 = 0;
    let mut depth = enumerator.len();

    while enumerator.len() <= config.max_depth {
        sequences_tested += 1;

        let mut attempt = state.clone();
        attempt.apply_sequence(enumerator.current());
        if attempt.is_solved() {
            let solution = enumerator.current().clone();
            debug!(
                "Solved with {} after {} sequences",
                solution, sequences_tested
            );
            return SolverResult {
                solution: Some(solution),
                sequences_tested,
                depth_reached: depth,
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
        }

        enumerator.advance();
        if enumerator.len() != depth {
            depth = enumerator.len();
            if depth > 2 && depth <= config.max_depth {
                info!("Searching {}-move sequences", depth);
            }
        }
    }

    SolverResult {
        solution: None,
        sequences_tested,
        depth_reached: config.max_depth.min(depth),
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}
