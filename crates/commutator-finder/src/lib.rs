//! Commutator finder for the 5x5 cube.
//!
//! Enumerates commutators `[A, B]` with a one-move A and a short B, and
//! records the ones whose net effect is a small, recognisable permutation
//! (3-cycles, double swaps, twists, flips and so on). Also contains a
//! brute-force solver over the same canonical move sequences.

mod classify;
pub mod criteria;
pub mod cube;
pub mod error;
pub mod finder;
pub mod moves;
pub mod sequence;
pub mod sink;
pub mod solver;

// Re-export main types
pub use criteria::{CaseType, CenterSafety, CriteriaFile, SearchCriteria};
pub use cube::CubeState;
pub use error::{FinderError, ParseError};
pub use finder::{CommutatorFinder, FinderConfig, Notation, OutputTarget};
pub use moves::{Axis, Move, MoveSequence, Turn, MAX_SEQUENCE_LEN};
pub use sequence::SequenceEnumerator;
pub use sink::{FileSink, MemorySink, ResultSink};
pub use solver::{solve, SolverConfig, SolverResult};
