//! Permutation state of a 5x5 cube.
//!
//! Every piece category is an array mapping slot index to the sticker that
//! currently occupies it. Corners and edges track each sticker of a piece
//! separately, so a twisted corner or flipped edge shows up as its stickers
//! rotated inside the piece's own slots.
//!
//! Corner and x-center slots (three per corner position):
//!
//! ```text
//! FUL LFU ULF | LUB BLU UBL | BUR RBU URB | RUF FRU UFR
//! FLD DFL LDF | LBD DLB BDL | BRD DBR RDB | RFD DRF FDR
//! ```
//!
//! Edge, t-center and wing slots (two per edge position):
//!
//! ```text
//! UF FU | UL LU | UR RU | UB BU | DF FD | DL LD
//! DR RD | DB BD | FL LF | FR RF | BL LB | BR RB
//! ```

use std::cell::Cell;
use std::fmt;

use crate::error::ParseError;
use crate::moves::{Move, MoveSequence, Turn, NUM_LAYERS};

/// Slots per sticker-tracked category
pub const NUM_STICKERS: usize = 24;
/// Faces, and therefore caps
pub const NUM_SIDES: usize = 6;
pub const NUM_CORNERS: usize = 8;
pub const NUM_EDGES: usize = 12;

pub(crate) const CORNER_STICKERS: usize = 3;
pub(crate) const EDGE_STICKERS: usize = 2;

pub type Stickers = [u8; NUM_STICKERS];
pub type Caps = [u8; NUM_SIDES];

const fn identity<const N: usize>() -> [u8; N] {
    let mut arr = [0u8; N];
    let mut i = 0;
    while i < N {
        arr[i] = i as u8;
        i += 1;
    }
    arr
}

const SOLVED_STICKERS: Stickers = identity();
const SOLVED_CAPS: Caps = identity();

const CORNER_LABELS: [&str; NUM_STICKERS] = [
    "FUL", "LFU", "ULF", "LUB", "BLU", "UBL", "BUR", "RBU", "URB", "RUF", "FRU", "UFR", "FLD",
    "DFL", "LDF", "LBD", "DLB", "BDL", "BRD", "DBR", "RDB", "RFD", "DRF", "FDR",
];

const EDGE_LABELS: [&str; NUM_STICKERS] = [
    "UF", "FU", "UL", "LU", "UR", "RU", "UB", "BU", "DF", "FD", "DL", "LD", "DR", "RD", "DB",
    "BD", "FL", "LF", "FR", "RF", "BL", "LB", "BR", "RB",
];

const X_CENTER_LABELS: [&str; NUM_STICKERS] = [
    "Ful", "Lfu", "Ulf", "Lub", "Blu", "Ubl", "Bur", "Rbu", "Urb", "Ruf", "Fru", "Ufr", "Fld",
    "Dfl", "Ldf", "Lbd", "Dlb", "Bdl", "Brd", "Dbr", "Rdb", "Rfd", "Drf", "Fdr",
];

const T_CENTER_LABELS: [&str; NUM_STICKERS] = [
    "Uf", "Fu", "Ul", "Lu", "Ur", "Ru", "Ub", "Bu", "Df", "Fd", "Dl", "Ld", "Dr", "Rd", "Db",
    "Bd", "Fl", "Lf", "Fr", "Rf", "Bl", "Lb", "Br", "Rb",
];

const WING_LABELS: [&str; NUM_STICKERS] = [
    "UFl", "FUr", "ULb", "LUf", "URf", "RUb", "UBr", "BUl", "DFr", "FDl", "DLf", "LDb", "DRb",
    "RDf", "DBl", "BDr", "FLu", "LFd", "FRd", "RFu", "BLd", "LBu", "BRu", "RBd",
];

const CAP_LABELS: [&str; NUM_SIDES] = ["U", "F", "R", "L", "D", "B"];

/// Face each x-center slot lies on
const X_CENTER_FACES: &[u8; NUM_STICKERS] = b"flulbubrurfufdlldbbdrrdf";
/// Face each t-center slot lies on
const T_CENTER_FACES: &[u8; NUM_STICKERS] = b"ufulurubdfdldrdbflfrblbr";

/// Four slots cycled by a clockwise quarter turn: `a -> b -> c -> d -> a`
type Cycle = [u8; 4];

/// Slot cycles a single layer turn performs, per category
struct LayerCycles {
    corners: Option<Cycle>,
    edges: Option<Cycle>,
    x_centers: [Option<Cycle>; 2],
    t_centers: [Option<Cycle>; 2],
    wings: [Option<Cycle>; 2],
    caps: Option<Cycle>,
}

const fn c(a: u8, b: u8, c: u8, d: u8) -> Option<Cycle> {
    Some([a, b, c, d])
}

const NO: Option<Cycle> = None;

/// Indexed by layer, in `LAYER_CHARS` order
static LAYER_CYCLES: [LayerCycles; NUM_LAYERS as usize] = [
    // L
    LayerCycles {
        corners: c(1, 14, 15, 3),
        edges: c(3, 17, 11, 21),
        x_centers: [c(1, 14, 15, 3), NO],
        t_centers: [c(3, 17, 11, 21), NO],
        wings: [c(3, 17, 11, 21), c(2, 16, 10, 20)],
        caps: NO,
    },
    // U
    LayerCycles {
        corners: c(5, 8, 11, 2),
        edges: c(0, 2, 6, 4),
        x_centers: [c(5, 8, 11, 2), NO],
        t_centers: [c(0, 2, 6, 4), NO],
        wings: [c(0, 2, 6, 4), c(1, 3, 7, 5)],
        caps: NO,
    },
    // R
    LayerCycles {
        corners: c(7, 20, 21, 9),
        edges: c(19, 5, 23, 13),
        x_centers: [c(7, 20, 21, 9), NO],
        t_centers: [c(19, 5, 23, 13), NO],
        wings: [c(19, 5, 23, 13), c(18, 4, 22, 12)],
        caps: NO,
    },
    // D
    LayerCycles {
        corners: c(13, 22, 19, 16),
        edges: c(8, 12, 14, 10),
        x_centers: [c(13, 22, 19, 16), NO],
        t_centers: [c(8, 12, 14, 10), NO],
        wings: [c(8, 12, 14, 10), c(9, 13, 15, 11)],
        caps: NO,
    },
    // F
    LayerCycles {
        corners: c(0, 10, 23, 12),
        edges: c(1, 18, 9, 16),
        x_centers: [c(0, 10, 23, 12), NO],
        t_centers: [c(1, 18, 9, 16), NO],
        wings: [c(1, 18, 9, 16), c(0, 19, 8, 17)],
        caps: NO,
    },
    // B
    LayerCycles {
        corners: c(6, 4, 17, 18),
        edges: c(7, 20, 15, 22),
        x_centers: [c(6, 4, 17, 18), NO],
        t_centers: [c(7, 20, 15, 22), NO],
        wings: [c(7, 20, 15, 22), c(6, 21, 14, 23)],
        caps: NO,
    },
    // l
    LayerCycles {
        corners: NO,
        edges: NO,
        x_centers: [c(5, 0, 13, 17), c(2, 12, 16, 4)],
        t_centers: [c(2, 16, 10, 20), NO],
        wings: [c(0, 9, 14, 7), NO],
        caps: NO,
    },
    // u
    LayerCycles {
        corners: NO,
        edges: NO,
        x_centers: [c(10, 1, 4, 7), c(0, 3, 6, 9)],
        t_centers: [c(1, 3, 7, 5), NO],
        wings: [c(16, 21, 22, 19), NO],
        caps: NO,
    },
    // r
    LayerCycles {
        corners: NO,
        edges: NO,
        x_centers: [c(8, 18, 22, 10), c(11, 6, 19, 23)],
        t_centers: [c(4, 22, 12, 18), NO],
        wings: [c(6, 15, 8, 1), NO],
        caps: NO,
    },
    // d
    LayerCycles {
        corners: NO,
        edges: NO,
        x_centers: [c(12, 21, 18, 15), c(23, 20, 17, 14)],
        t_centers: [c(9, 13, 15, 11), NO],
        wings: [c(18, 23, 20, 17), NO],
        caps: NO,
    },
    // f
    LayerCycles {
        corners: NO,
        edges: NO,
        x_centers: [c(2, 9, 22, 14), c(11, 21, 13, 1)],
        t_centers: [c(0, 19, 8, 17), NO],
        wings: [c(4, 13, 10, 3), NO],
        caps: NO,
    },
    // b
    LayerCycles {
        corners: NO,
        edges: NO,
        x_centers: [c(8, 3, 16, 20), c(5, 15, 19, 7)],
        t_centers: [c(6, 21, 14, 23), NO],
        wings: [c(2, 11, 12, 5), NO],
        caps: NO,
    },
    // M
    LayerCycles {
        corners: NO,
        edges: c(0, 9, 14, 7),
        x_centers: [NO, NO],
        t_centers: [c(0, 9, 14, 7), c(6, 1, 8, 15)],
        wings: [NO, NO],
        caps: c(0, 1, 4, 5),
    },
    // E
    LayerCycles {
        corners: NO,
        edges: c(18, 23, 20, 17),
        x_centers: [NO, NO],
        t_centers: [c(18, 23, 20, 17), c(16, 19, 22, 21)],
        wings: [NO, NO],
        caps: c(1, 2, 5, 3),
    },
    // S
    LayerCycles {
        corners: NO,
        edges: c(4, 13, 10, 3),
        x_centers: [NO, NO],
        t_centers: [c(4, 13, 10, 3), c(2, 5, 12, 11)],
        wings: [NO, NO],
        caps: c(0, 2, 4, 3),
    },
];

/// Rotate a 4-cycle by `turn`, expressed as pairwise swaps
fn apply_cycle(cycle: &Cycle, turn: Turn, mut swap: impl FnMut(u8, u8)) {
    let [c0, c1, c2, c3] = *cycle;
    match turn {
        Turn::Clockwise => {
            swap(c3, c2);
            swap(c2, c1);
            swap(c1, c0);
        }
        Turn::Half => {
            swap(c0, c2);
            swap(c1, c3);
        }
        Turn::CounterClockwise => {
            swap(c0, c1);
            swap(c1, c2);
            swap(c2, c3);
        }
    }
}

fn next_sticker_in_piece(index: usize, piece_size: usize) -> usize {
    if (index + 1) % piece_size == 0 {
        index + 1 - piece_size
    } else {
        index + 1
    }
}

/// Rotate the stickers of one piece in place. For edges both directions flip.
fn rotate_piece(state: &mut Stickers, piece: usize, piece_size: usize, clockwise: bool) {
    let stickers = &mut state[piece * piece_size..(piece + 1) * piece_size];
    if clockwise {
        stickers.rotate_right(1);
    } else {
        stickers.rotate_left(1);
    }
}

/// Exchange the pieces holding slots `a` and `b`, sticker by sticker.
/// Two slots of the same piece twist (or flip) that piece instead.
fn swap_pieces(state: &mut Stickers, a: u8, b: u8, piece_size: usize) {
    let (mut a, mut b) = (a as usize, b as usize);
    if a == b {
        return;
    }
    if a / piece_size == b / piece_size {
        rotate_piece(state, a / piece_size, piece_size, a < b);
        return;
    }
    for _ in 0..piece_size {
        state.swap(a, b);
        a = next_sticker_in_piece(a, piece_size);
        b = next_sticker_in_piece(b, piece_size);
    }
}

pub(crate) fn is_identity(state: &[u8]) -> bool {
    state.iter().enumerate().all(|(i, &p)| p as usize == i)
}

/// Number of slots not holding their own sticker
pub(crate) fn mismatches(state: &[u8]) -> usize {
    state
        .iter()
        .enumerate()
        .filter(|&(i, &p)| p as usize != i)
        .count()
}

fn first_displaced(state: &[u8]) -> Option<usize> {
    state.iter().enumerate().position(|(i, &p)| p as usize != i)
}

/// Every slot holds an element of its own group
pub(crate) fn grouped_by(group_size: usize, state: &[u8]) -> bool {
    state
        .iter()
        .enumerate()
        .all(|(i, &p)| p as usize / group_size == i / group_size)
}

/// `grouped_by`, excluding the identity
pub(crate) fn grouped_but_not_identity(group_size: usize, state: &[u8]) -> bool {
    grouped_by(group_size, state) && !is_identity(state)
}

/// Some group holds exactly its own elements, none of them in place
pub(crate) fn has_scrambled_group(group_size: usize, state: &[u8]) -> bool {
    state.chunks(group_size).enumerate().any(|(group, chunk)| {
        chunk.len() == group_size
            && chunk.iter().enumerate().all(|(offset, &p)| {
                let slot = group * group_size + offset;
                p as usize / group_size == group && p as usize != slot
            })
    })
}

fn x_centers_on_their_faces(state: &Stickers) -> bool {
    state
        .iter()
        .enumerate()
        .all(|(i, &p)| X_CENTER_FACES[i] == X_CENTER_FACES[p as usize])
}

fn t_centers_on_their_faces(state: &Stickers) -> bool {
    state
        .iter()
        .enumerate()
        .all(|(i, &p)| T_CENTER_FACES[i] == T_CENTER_FACES[p as usize])
}

/// Cached answer to "are all centers on their own face"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CenterCache {
    No,
    Yes,
    Unknown,
}

/// Full permutation state of the cube
#[derive(Debug, Clone)]
pub struct CubeState {
    pub(crate) corners: Stickers,
    pub(crate) edges: Stickers,
    pub(crate) x_centers: Stickers,
    pub(crate) t_centers: Stickers,
    pub(crate) wings: Stickers,
    pub(crate) caps: Caps,
    centers_safe: Cell<CenterCache>,
}

impl Default for CubeState {
    fn default() -> Self {
        Self {
            corners: SOLVED_STICKERS,
            edges: SOLVED_STICKERS,
            x_centers: SOLVED_STICKERS,
            t_centers: SOLVED_STICKERS,
            wings: SOLVED_STICKERS,
            caps: SOLVED_CAPS,
            centers_safe: Cell::new(CenterCache::Yes),
        }
    }
}

impl PartialEq for CubeState {
    fn eq(&self, other: &Self) -> bool {
        self.corners == other.corners
            && self.edges == other.edges
            && self.x_centers == other.x_centers
            && self.t_centers == other.t_centers
            && self.wings == other.wings
            && self.caps == other.caps
    }
}

impl Eq for CubeState {}

impl CubeState {
    /// A solved cube
    pub fn new() -> Self {
        Self::default()
    }

    /// A solved cube with `scramble` applied
    pub fn from_scramble(scramble: &str) -> Result<Self, ParseError> {
        let mut state = Self::new();
        state.apply_scramble(scramble)?;
        Ok(state)
    }

    /// Solve every piece
    pub fn reset(&mut self) -> &mut Self {
        self.corners = SOLVED_STICKERS;
        self.edges = SOLVED_STICKERS;
        self.wings = SOLVED_STICKERS;
        self.reset_centers()
    }

    /// Solve x-centers, t-centers and caps
    pub fn reset_centers(&mut self) -> &mut Self {
        self.x_centers = SOLVED_STICKERS;
        self.t_centers = SOLVED_STICKERS;
        self.caps = SOLVED_CAPS;
        self.centers_safe.set(CenterCache::Yes);
        self
    }

    pub fn apply_move(&mut self, m: Move) {
        let cycles = &LAYER_CYCLES[m.layer() as usize];
        let turn = m.turn();

        if let Some(cycle) = &cycles.corners {
            let corners = &mut self.corners;
            apply_cycle(cycle, turn, |a, b| swap_pieces(corners, a, b, CORNER_STICKERS));
        }
        if let Some(cycle) = &cycles.edges {
            let edges = &mut self.edges;
            apply_cycle(cycle, turn, |a, b| swap_pieces(edges, a, b, EDGE_STICKERS));
        }
        for cycle in cycles.x_centers.iter().flatten() {
            apply_cycle(cycle, turn, |a, b| self.x_centers.swap(a as usize, b as usize));
        }
        for cycle in cycles.t_centers.iter().flatten() {
            apply_cycle(cycle, turn, |a, b| self.t_centers.swap(a as usize, b as usize));
        }
        for cycle in cycles.wings.iter().flatten() {
            apply_cycle(cycle, turn, |a, b| self.wings.swap(a as usize, b as usize));
        }
        if let Some(cycle) = &cycles.caps {
            apply_cycle(cycle, turn, |a, b| self.caps.swap(a as usize, b as usize));
        }

        // Inner layers can carry centers off their face. A cube known to be
        // safe becomes unsafe; anything else has to be checked again.
        if !m.is_outer() {
            let next = match self.centers_safe.get() {
                CenterCache::Yes => CenterCache::No,
                _ => CenterCache::Unknown,
            };
            self.centers_safe.set(next);
        }
    }

    pub fn apply_sequence(&mut self, moves: &MoveSequence) -> &mut Self {
        for &m in moves {
            self.apply_move(m);
        }
        self
    }

    pub fn apply_scramble(&mut self, scramble: &str) -> Result<&mut Self, ParseError> {
        let moves = MoveSequence::parse(scramble)?;
        Ok(self.apply_sequence(&moves))
    }

    /// Rotate the stickers of corner `piece` (0..8)
    pub fn twist_corner(&mut self, piece: usize, clockwise: bool) {
        rotate_piece(&mut self.corners, piece, CORNER_STICKERS, clockwise);
    }

    /// Flip edge `piece` (0..12)
    pub fn flip_edge(&mut self, piece: usize) {
        rotate_piece(&mut self.edges, piece, EDGE_STICKERS, true);
    }

    /// Every slot holds its own sticker, caps aside
    pub fn is_solved(&self) -> bool {
        is_identity(&self.corners)
            && is_identity(&self.edges)
            && is_identity(&self.wings)
            && self.centers_solved()
    }

    /// Caps are solved and every x/t-center sits on its own face,
    /// possibly swapped with a same-colored neighbour
    pub fn centers_safe(&self) -> bool {
        if self.centers_safe.get() == CenterCache::Unknown {
            let safe = is_identity(&self.caps)
                && x_centers_on_their_faces(&self.x_centers)
                && t_centers_on_their_faces(&self.t_centers);
            self.centers_safe.set(if safe {
                CenterCache::Yes
            } else {
                CenterCache::No
            });
        }
        self.centers_safe.get() == CenterCache::Yes
    }

    /// x-centers and t-centers are strictly solved
    pub fn centers_solved(&self) -> bool {
        if self.centers_safe.get() == CenterCache::No {
            return false;
        }
        is_identity(&self.x_centers) && is_identity(&self.t_centers)
    }

    /// All corners are in place and at least one of them is twisted
    pub fn corners_twisted_and_solved(&self) -> bool {
        grouped_but_not_identity(CORNER_STICKERS, &self.corners)
    }

    /// Some corner is in its own position but twisted
    pub fn has_corner_twists(&self) -> bool {
        has_scrambled_group(CORNER_STICKERS, &self.corners)
    }

    /// All edges are in place and at least one of them is flipped
    pub fn edges_flipped_and_solved(&self) -> bool {
        grouped_but_not_identity(EDGE_STICKERS, &self.edges)
    }

    /// Some edge is in its own position but flipped
    pub fn has_edge_flips(&self) -> bool {
        has_scrambled_group(EDGE_STICKERS, &self.edges)
    }

    /// Displaced slots across every category
    pub fn total_mismatches(&self) -> usize {
        mismatches(&self.corners)
            + mismatches(&self.caps)
            + mismatches(&self.x_centers)
            + mismatches(&self.t_centers)
            + mismatches(&self.edges)
            + mismatches(&self.wings)
    }

    /// Solve the cube while describing the cycles that were undone, e.g.
    /// `UFR-URB-ULF.` for a corner 3-cycle.
    ///
    /// With `ignore_centers_if_safe`, centers that only moved within their
    /// faces are restored without being described.
    pub fn solve_and_decompose(&mut self, ignore_centers_if_safe: bool) -> String {
        if ignore_centers_if_safe && self.centers_safe() {
            self.t_centers = SOLVED_STICKERS;
            self.x_centers = SOLVED_STICKERS;
        }
        self.centers_safe.set(CenterCache::Yes);

        let mut description = String::new();
        decompose_pieces(&mut self.corners, &CORNER_LABELS, CORNER_STICKERS, &mut description);
        decompose_pieces(&mut self.edges, &EDGE_LABELS, EDGE_STICKERS, &mut description);
        decompose_elements(&mut self.t_centers, &T_CENTER_LABELS, &mut description);
        decompose_elements(&mut self.x_centers, &X_CENTER_LABELS, &mut description);
        decompose_elements(&mut self.wings, &WING_LABELS, &mut description);
        decompose_elements(&mut self.caps, &CAP_LABELS, &mut description);
        description
    }

    /// Labels of every displaced center and wing slot, space separated
    pub fn unsolved_elements(&self) -> String {
        let mut out = String::new();
        let categories: [(&Stickers, &[&str; NUM_STICKERS]); 3] = [
            (&self.x_centers, &X_CENTER_LABELS),
            (&self.t_centers, &T_CENTER_LABELS),
            (&self.wings, &WING_LABELS),
        ];
        for (state, labels) in categories {
            for (i, &p) in state.iter().enumerate() {
                if p as usize != i {
                    out.push_str(labels[i]);
                    out.push(' ');
                }
            }
        }
        out
    }
}

/// Undo cycles of a single-sticker category, writing `a-b-c.` per cycle
fn decompose_elements(state: &mut [u8], labels: &[&str], out: &mut String) {
    while let Some(i) = first_displaced(state) {
        while state[i] as usize != i {
            let piece = state[i] as usize;
            out.push_str(labels[piece]);
            out.push('-');
            state.swap(i, piece);
        }
        out.push_str(labels[i]);
        out.push('.');
    }
}

/// Undo cycles of corners or edges, moving whole pieces
fn decompose_pieces(state: &mut Stickers, labels: &[&str], piece_size: usize, out: &mut String) {
    while let Some(i) = first_displaced(state) {
        out.push_str(labels[i]);
        while state[i] as usize != i {
            let target = state[i];
            out.push('-');
            out.push_str(labels[target as usize]);
            swap_pieces(state, i as u8, target, piece_size);
        }
        out.push('.');
    }
}

fn write_category(f: &mut fmt::Formatter<'_>, name: &str, state: &[u8]) -> fmt::Result {
    write!(f, "{}: [", name)?;
    for (i, p) in state.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", p)?;
    }
    f.write_str("]")?;
    if is_identity(state) {
        f.write_str(" // solved")?;
    }
    writeln!(f)
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CubeState: {{")?;
        write_category(f, "c", &self.corners)?;
        write_category(f, "e", &self.edges)?;
        write_category(f, "w", &self.wings)?;
        write_category(f, "x", &self.x_centers)?;
        write_category(f, "t", &self.t_centers)?;
        write_category(f, "^", &self.caps)?;
        write!(f, "}}")
    }
}
