//! Case-type classification of a cube state.
//!
//! Classification walks an ordered list of steps. Each rule pairs a case
//! type with a structural check; the first enabled rule that matches wins.
//! Gates stop the walk early when the state cannot be interesting.

use crate::criteria::{CaseType, CenterSafety, SearchCriteria};
use crate::cube::{is_identity, mismatches, CubeState};

/// Mismatch counts and orientation flags of one state
struct Profile {
    corners: usize,
    edges: usize,
    x_centers: usize,
    t_centers: usize,
    wings: usize,
    has_twists: bool,
    has_flips: bool,
    twisted_and_solved: bool,
    flipped_and_solved: bool,
}

impl Profile {
    fn new(cube: &CubeState, wings: usize) -> Self {
        Self {
            corners: mismatches(&cube.corners),
            edges: mismatches(&cube.edges),
            x_centers: mismatches(&cube.x_centers),
            t_centers: mismatches(&cube.t_centers),
            wings,
            has_twists: cube.has_corner_twists(),
            has_flips: cube.has_edge_flips(),
            twisted_and_solved: cube.corners_twisted_and_solved(),
            flipped_and_solved: cube.edges_flipped_and_solved(),
        }
    }

    /// Corners, edges and wings all solved
    fn outer_solved(&self) -> bool {
        self.corners == 0 && self.edges == 0 && self.wings == 0
    }

    fn only_x_centers(&self, count: usize) -> bool {
        self.outer_solved() && self.t_centers == 0 && self.x_centers == count
    }

    fn only_t_centers(&self, count: usize) -> bool {
        self.outer_solved() && self.x_centers == 0 && self.t_centers == count
    }

    fn only_wings(&self, count: usize) -> bool {
        self.corners == 0 && self.edges == 0 && self.wings == count
    }

    fn only_corners(&self, stickers: usize) -> bool {
        self.edges == 0 && self.wings == 0 && self.corners == stickers
    }

    fn only_edges(&self, stickers: usize) -> bool {
        self.corners == 0 && self.wings == 0 && self.edges == stickers
    }
}

enum Step {
    /// Return the case if it is requested and the check passes
    Rule(CaseType, fn(&Profile) -> bool),
    /// Stop unless the centers satisfy the criteria's safety policy
    CenterSafetyGate,
    /// Stop when corners are twisted and edges are flipped at once
    TwistFlipGate,
}

const CLASSIFICATION: &[Step] = &[
    // Center cases ignore the safety policy
    Step::Rule(CaseType::X3Cycles, |p| p.only_x_centers(3)),
    Step::Rule(CaseType::X22Swaps, |p| p.only_x_centers(4)),
    Step::Rule(CaseType::X5Cycles, |p| p.only_x_centers(5)),
    Step::Rule(CaseType::T3Cycles, |p| p.only_t_centers(3)),
    Step::Rule(CaseType::T22Swaps, |p| p.only_t_centers(4)),
    Step::Rule(CaseType::T5Cycles, |p| p.only_t_centers(5)),
    Step::CenterSafetyGate,
    Step::Rule(CaseType::AllSolved, |p| p.outer_solved()),
    Step::Rule(CaseType::W2Cycles, |p| p.only_wings(2)),
    Step::Rule(CaseType::W3Cycles, |p| p.only_wings(3)),
    Step::Rule(CaseType::W22Swaps, |p| p.only_wings(4)),
    Step::Rule(CaseType::W5Cycles, |p| p.only_wings(5)),
    Step::TwistFlipGate,
    Step::Rule(CaseType::C3Cycles, |p| !p.has_twists && p.only_corners(3 * 3)),
    Step::Rule(CaseType::C22Swaps, |p| !p.has_twists && p.only_corners(4 * 3)),
    Step::Rule(CaseType::C5Cycles, |p| !p.has_twists && p.only_corners(5 * 3)),
    Step::Rule(CaseType::Corner2Twists, |p| {
        p.twisted_and_solved && p.only_corners(2 * 3)
    }),
    Step::Rule(CaseType::Corner3Twists, |p| {
        p.twisted_and_solved && p.only_corners(3 * 3)
    }),
    Step::Rule(CaseType::Corner4Twists, |p| {
        p.twisted_and_solved && p.only_corners(4 * 3)
    }),
    Step::Rule(CaseType::E3Cycles, |p| !p.has_flips && p.only_edges(3 * 2)),
    Step::Rule(CaseType::E22Swaps, |p| !p.has_flips && p.only_edges(4 * 2)),
    Step::Rule(CaseType::E5Cycles, |p| !p.has_flips && p.only_edges(5 * 2)),
    Step::Rule(CaseType::Edges2Flips, |p| {
        p.flipped_and_solved && p.only_edges(2 * 2)
    }),
    Step::Rule(CaseType::Edges4Flips, |p| {
        p.flipped_and_solved && p.only_edges(4 * 2)
    }),
];

/// Most wing mismatches any case type allows
const MAX_WING_MISMATCHES: usize = 5;

impl CubeState {
    /// The first requested case type this state matches, if any
    pub fn classify(&self, criteria: &SearchCriteria) -> Option<CaseType> {
        if !is_identity(&self.caps) {
            return None;
        }
        let wings = mismatches(&self.wings);
        if wings > MAX_WING_MISMATCHES {
            return None;
        }
        let profile = Profile::new(self, wings);

        for step in CLASSIFICATION {
            match step {
                Step::Rule(case, matches) => {
                    if criteria.get(*case) && matches(&profile) {
                        return Some(*case);
                    }
                }
                Step::CenterSafetyGate => {
                    let complied = match criteria.center_safety() {
                        CenterSafety::Strict => {
                            profile.x_centers == 0 && profile.t_centers == 0
                        }
                        CenterSafety::Solved => self.centers_safe(),
                        CenterSafety::Ignore => true,
                    };
                    if !complied {
                        return None;
                    }
                }
                Step::TwistFlipGate => {
                    if profile.has_twists && profile.has_flips {
                        return None;
                    }
                }
            }
        }
        None
    }
}
