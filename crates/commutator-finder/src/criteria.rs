//! Search criteria: which case types a search is looking for, and how
//! strictly centers must be preserved.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FinderError;

/// How much a result may disturb the centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterSafety {
    /// `[U, M U' M]` allowed, `[M, U2]` allowed
    Ignore,
    /// `[U, M U' M]` not allowed, `[M, U2]` allowed
    Solved,
    /// `[U, M U' M]` not allowed, `[M, U2]` not allowed
    Strict,
}

/// A named permutation pattern a search can look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CaseType {
    #[serde(rename = "c3cycles")]
    C3Cycles,
    #[serde(rename = "e3cycles")]
    E3Cycles,
    #[serde(rename = "x3cycles")]
    X3Cycles,
    #[serde(rename = "t3cycles")]
    T3Cycles,
    #[serde(rename = "w3cycles")]
    W3Cycles,
    #[serde(rename = "c22swaps")]
    C22Swaps,
    #[serde(rename = "e22swaps")]
    E22Swaps,
    #[serde(rename = "x22swaps")]
    X22Swaps,
    #[serde(rename = "t22swaps")]
    T22Swaps,
    #[serde(rename = "w22swaps")]
    W22Swaps,
    #[serde(rename = "w2cycles")]
    W2Cycles,
    #[serde(rename = "c5cycles")]
    C5Cycles,
    #[serde(rename = "e5cycles")]
    E5Cycles,
    #[serde(rename = "x5cycles")]
    X5Cycles,
    #[serde(rename = "t5cycles")]
    T5Cycles,
    #[serde(rename = "w5cycles")]
    W5Cycles,
    #[serde(rename = "corner2Twists")]
    Corner2Twists,
    #[serde(rename = "corner3Twists")]
    Corner3Twists,
    #[serde(rename = "corner4Twists")]
    Corner4Twists,
    #[serde(rename = "edges2flips")]
    Edges2Flips,
    #[serde(rename = "edges4flips")]
    Edges4Flips,
    #[serde(rename = "allSolved")]
    AllSolved,
}

impl CaseType {
    pub const COUNT: usize = 22;

    /// Every case type in declaration order
    pub const ALL: [CaseType; CaseType::COUNT] = [
        CaseType::C3Cycles,
        CaseType::E3Cycles,
        CaseType::X3Cycles,
        CaseType::T3Cycles,
        CaseType::W3Cycles,
        CaseType::C22Swaps,
        CaseType::E22Swaps,
        CaseType::X22Swaps,
        CaseType::T22Swaps,
        CaseType::W22Swaps,
        CaseType::W2Cycles,
        CaseType::C5Cycles,
        CaseType::E5Cycles,
        CaseType::X5Cycles,
        CaseType::T5Cycles,
        CaseType::W5Cycles,
        CaseType::Corner2Twists,
        CaseType::Corner3Twists,
        CaseType::Corner4Twists,
        CaseType::Edges2Flips,
        CaseType::Edges4Flips,
        CaseType::AllSolved,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CaseType::C3Cycles => "c3cycles",
            CaseType::E3Cycles => "e3cycles",
            CaseType::X3Cycles => "x3cycles",
            CaseType::T3Cycles => "t3cycles",
            CaseType::W3Cycles => "w3cycles",
            CaseType::C22Swaps => "c22swaps",
            CaseType::E22Swaps => "e22swaps",
            CaseType::X22Swaps => "x22swaps",
            CaseType::T22Swaps => "t22swaps",
            CaseType::W22Swaps => "w22swaps",
            CaseType::W2Cycles => "w2cycles",
            CaseType::C5Cycles => "c5cycles",
            CaseType::E5Cycles => "e5cycles",
            CaseType::X5Cycles => "x5cycles",
            CaseType::T5Cycles => "t5cycles",
            CaseType::W5Cycles => "w5cycles",
            CaseType::Corner2Twists => "corner2Twists",
            CaseType::Corner3Twists => "corner3Twists",
            CaseType::Corner4Twists => "corner4Twists",
            CaseType::Edges2Flips => "edges2flips",
            CaseType::Edges4Flips => "edges4flips",
            CaseType::AllSolved => "allSolved",
        }
    }

    /// True for the x-center and t-center cases
    pub fn is_center_case(self) -> bool {
        matches!(
            self,
            CaseType::X3Cycles
                | CaseType::T3Cycles
                | CaseType::X22Swaps
                | CaseType::T22Swaps
                | CaseType::X5Cycles
                | CaseType::T5Cycles
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of requested case types plus the center safety policy.
/// Built once per run and only read during search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    cases: [bool; CaseType::COUNT],
    center_safety: CenterSafety,
}

impl SearchCriteria {
    /// `search_everything` sets every case type, `AllSolved` included
    pub fn new(search_everything: bool, center_safety: CenterSafety) -> Self {
        Self {
            cases: [search_everything; CaseType::COUNT],
            center_safety,
        }
    }

    /// Everything except `AllSolved`: no point finding algorithms that do nothing
    pub fn all_but_solved(center_safety: CenterSafety) -> Self {
        let mut criteria = Self::new(true, center_safety);
        criteria.set(CaseType::AllSolved, false);
        criteria
    }

    pub fn get(&self, case: CaseType) -> bool {
        self.cases[case.index()]
    }

    pub fn set(&mut self, case: CaseType, value: bool) {
        self.cases[case.index()] = value;
    }

    pub fn center_safety(&self) -> CenterSafety {
        self.center_safety
    }

    /// Requested case types in declaration order
    pub fn enabled(&self) -> impl Iterator<Item = CaseType> + '_ {
        CaseType::ALL.into_iter().filter(|&c| self.get(c))
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self::all_but_solved(CenterSafety::Solved)
    }
}

/// On-disk criteria description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaFile {
    #[serde(default = "default_center_safety")]
    pub center_safety: CenterSafety,
    pub cases: Vec<CaseType>,
}

fn default_center_safety() -> CenterSafety {
    CenterSafety::Solved
}

impl CriteriaFile {
    pub fn from_json(json: &str) -> Result<Self, FinderError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_criteria(self) -> SearchCriteria {
        let mut criteria = SearchCriteria::new(false, self.center_safety);
        for case in self.cases {
            criteria.set(case, true);
        }
        criteria
    }
}
