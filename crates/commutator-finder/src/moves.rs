//! Move algebra for the 5x5 cube.
//!
//! A move is one of 15 layers turned by one of 3 amounts. Layers are
//! ordered `LURDFBlurdfbMES`: the six outer faces, the six inner slices
//! next to them, and the three middle slices. The move index is
//! `turn * 15 + layer`, so indices 0..15 are clockwise quarter turns,
//! 15..30 are half turns and 30..45 are counter-clockwise quarter turns.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::ParseError;

/// Layer letters in index order
pub const LAYER_CHARS: &str = "LURDFBlurdfbMES";

/// Number of turnable layers
pub const NUM_LAYERS: u8 = 15;

/// Number of distinct moves (every layer times every turn amount)
pub const NUM_MOVES: u8 = NUM_LAYERS * 3;

/// Inline capacity of a move sequence; also the default solver depth
pub const MAX_SEQUENCE_LEN: usize = 10;

/// Number of outer face layers at the start of `LAYER_CHARS`
const NUM_OUTER_LAYERS: u8 = 6;

/// Rotation axis of a layer. Layers on the same axis commute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// `L R l r M`
    X,
    /// `U D u d E`
    Y,
    /// `F B f b S`
    Z,
}

const LAYER_AXES: [Axis; NUM_LAYERS as usize] = [
    Axis::X, // L
    Axis::Y, // U
    Axis::X, // R
    Axis::Y, // D
    Axis::Z, // F
    Axis::Z, // B
    Axis::X, // l
    Axis::Y, // u
    Axis::X, // r
    Axis::Y, // d
    Axis::Z, // f
    Axis::Z, // b
    Axis::X, // M
    Axis::Y, // E
    Axis::Z, // S
];

/// Turn amount of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    Half,
    CounterClockwise,
}

impl Turn {
    fn from_index(index: u8) -> Turn {
        match index {
            0 => Turn::Clockwise,
            1 => Turn::Half,
            _ => Turn::CounterClockwise,
        }
    }

    fn index(self) -> u8 {
        match self {
            Turn::Clockwise => 0,
            Turn::Half => 1,
            Turn::CounterClockwise => 2,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::Half => "2",
            Turn::CounterClockwise => "'",
        }
    }
}

/// A single move. Always in `0..NUM_MOVES`; "no move" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    /// `L`, the lowest move index
    pub const FIRST: Move = Move(0);
    /// `S'`, the highest move index
    pub const LAST: Move = Move(NUM_MOVES - 1);

    pub fn from_index(index: u8) -> Option<Move> {
        (index < NUM_MOVES).then_some(Move(index))
    }

    pub fn new(layer: u8, turn: Turn) -> Option<Move> {
        (layer < NUM_LAYERS).then(|| Move(turn.index() * NUM_LAYERS + layer))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Layer index into `LAYER_CHARS`, ignoring the turn amount
    pub fn layer(self) -> u8 {
        self.0 % NUM_LAYERS
    }

    pub fn turn(self) -> Turn {
        Turn::from_index(self.0 / NUM_LAYERS)
    }

    pub fn axis(self) -> Axis {
        LAYER_AXES[self.layer() as usize]
    }

    /// The move that undoes this one. Half turns are their own inverse.
    pub fn inverse(self) -> Move {
        match self.turn() {
            Turn::Clockwise => Move(self.0 + 2 * NUM_LAYERS),
            Turn::Half => self,
            Turn::CounterClockwise => Move(self.0 - 2 * NUM_LAYERS),
        }
    }

    /// True if both moves turn the same layer, e.g. `R` and `R2`
    pub fn same_layer(self, other: Move) -> bool {
        self.layer() == other.layer()
    }

    /// `same_layer` for possibly absent moves. Absent moves never match.
    pub fn same_layer_opt(a: Option<Move>, b: Option<Move>) -> bool {
        matches!((a, b), (Some(a), Some(b)) if a.same_layer(b))
    }

    /// True if the layers are parallel or identical, e.g. `R` and `M'`
    pub fn is_parallel_to(self, other: Move) -> bool {
        self.axis() == other.axis()
    }

    /// True for `L U R D F B` turns of any amount
    pub fn is_outer(self) -> bool {
        self.layer() < NUM_OUTER_LAYERS
    }

    /// Next move in index order, `None` after `Move::LAST`
    pub fn successor(self) -> Option<Move> {
        Move::from_index(self.0 + 1)
    }

    /// Every move in index order
    pub fn all() -> impl Iterator<Item = Move> {
        (0..NUM_MOVES).map(Move)
    }

    /// Parse a single move such as `R`, `R2`, `R'` or `` R` ``.
    ///
    /// Returns `None` for anything else, including the empty string.
    pub fn parse(token: &str) -> Option<Move> {
        let mut chars = token.chars();
        let layer = LAYER_CHARS.find(chars.next()?)? as u8;
        let turn = match chars.next() {
            None => Turn::Clockwise,
            Some('2') => Turn::Half,
            Some('\'') | Some('`') => Turn::CounterClockwise,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Move::new(layer, turn)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layer = self.layer() as usize;
        write!(
            f,
            "{}{}",
            &LAYER_CHARS[layer..layer + 1],
            self.turn().suffix()
        )
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s).ok_or_else(|| ParseError::InvalidMove {
            token: s.to_string(),
            position: 0,
        })
    }
}

/// An ordered list of moves
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence(SmallVec<[Move; MAX_SEQUENCE_LEN]>);

impl MoveSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse space-separated notation, e.g. `"R U R' U'"`.
    /// Empty input is the empty sequence.
    pub fn parse(scramble: &str) -> Result<Self, ParseError> {
        scramble
            .split_whitespace()
            .enumerate()
            .map(|(position, token)| {
                Move::parse(token).ok_or_else(|| ParseError::InvalidMove {
                    token: token.to_string(),
                    position,
                })
            })
            .collect()
    }

    pub fn push(&mut self, m: Move) {
        self.0.push(m);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<Move> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Move> {
        self.0.last().copied()
    }

    /// The sequence that undoes this one: reversed, each move inverted
    pub fn inverse(&self) -> MoveSequence {
        self.0.iter().rev().map(|m| m.inverse()).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveSequence(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

impl FromStr for MoveSequence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveSequence::parse(s)
    }
}
