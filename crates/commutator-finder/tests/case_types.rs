use commutator_finder::{CaseType, CenterSafety, CubeState, SearchCriteria};

const SEXY: &str = "R U R` U`";
const SEXY_INVERSE_FOUR: &str = "U R U` R` U R U` R`";
const FLIP_UF_UB: &str = "M` U' M` U` M` U2 M U` M U` M U2";

fn two_sexy() -> String {
    format!("{SEXY} {SEXY}")
}

/// Algorithms that produce each case type, all of them safe for solved centers
fn reference_algorithms() -> Vec<(Option<CaseType>, Vec<String>)> {
    let s2 = two_sexy();
    let table: Vec<(Option<CaseType>, Vec<String>)> = vec![
        (Some(CaseType::C3Cycles), vec!["R U R` D R U` R` D`".into(), "U` L2 U R2 U` L2 U R2".into()]),
        (Some(CaseType::E3Cycles), vec!["M` U L` U` M U L U`".into(), "M` U2 M U2".into()]),
        (Some(CaseType::X3Cycles), vec!["U l u l` U` l u` l`".into(), "r` d2 r U2 r` d2 r U2".into()]),
        (Some(CaseType::T3Cycles), vec!["M` U l` U` M U l U`".into(), "E r U` r` E` r U r`".into()]),
        (Some(CaseType::W3Cycles), vec!["l` U L` U` l U L U`".into(), "d R U` R` d` R U R`".into()]),
        (Some(CaseType::C22Swaps), vec!["M2 l2 r2 U M2 l2 r2 U2 M2 l2 r2 U M2 l2 r2 U2".into()]),
        (Some(CaseType::E22Swaps), vec!["M2 U M2 U2 M2 U M2".into()]),
        (Some(CaseType::X22Swaps), vec!["l f l` u l` u` l f`".into()]),
        (Some(CaseType::T22Swaps), vec!["M` U2 M U2 M` U2 M U2 M` U2 M U2".into()]),
        (Some(CaseType::W22Swaps), vec!["R L f R` L` F2 R L f` R` L` F2".into()]),
        (Some(CaseType::W2Cycles), vec!["r U2 r U2 l` M` r U2 r U2 r` U2 l U2 r2 M".into()]),
        (Some(CaseType::C5Cycles), vec!["U R` L D2 R L` U` R` L D2 R L`".into()]),
        (Some(CaseType::E5Cycles), vec!["M' U2 M U M' U2 M U'".into()]),
        (Some(CaseType::X5Cycles), vec!["l u L u l` u` L` u`".into()]),
        (Some(CaseType::T5Cycles), vec!["M u L u M` u` L` u`".into()]),
        (Some(CaseType::W5Cycles), vec!["L D U' l D' U L` U` D l` U D`".into()]),
        (Some(CaseType::Corner2Twists), vec![format!("{s2} D {SEXY_INVERSE_FOUR} D`")]),
        (Some(CaseType::Corner3Twists), vec![format!("{s2} D {s2} D {s2} D2")]),
        (
            Some(CaseType::Corner4Twists),
            vec![format!("{s2} D {SEXY_INVERSE_FOUR} D {s2} D {SEXY_INVERSE_FOUR} D")],
        ),
        (
            Some(CaseType::Edges2Flips),
            vec!["R M U2 M2 U R` U` M2 U2 M` U` R U R`".into(), FLIP_UF_UB.into()],
        ),
        (Some(CaseType::Edges4Flips), vec![format!("{FLIP_UF_UB} U {FLIP_UF_UB} U`")]),
        (
            Some(CaseType::AllSolved),
            vec![
                String::new(),
                format!("{s2} {s2} {s2}"),
                "R R` U U`".into(),
                "U2 U2".into(),
            ],
        ),
        (None, vec!["M U M` U M U M` U".into(), "R".into(), "S".into()]),
    ];
    table
}

#[test]
fn test_reference_algorithms_classify() {
    let criteria = SearchCriteria::new(true, CenterSafety::Solved);
    for (expected, algorithms) in reference_algorithms() {
        for alg in algorithms {
            let cube = CubeState::from_scramble(&alg).unwrap();
            assert_eq!(cube.classify(&criteria), expected, "{alg}\n{cube}");
        }
    }
}

#[test]
fn test_every_case_type_has_an_algorithm() {
    let covered: Vec<CaseType> = reference_algorithms()
        .into_iter()
        .filter_map(|(case, _)| case)
        .collect();
    for case in CaseType::ALL {
        assert!(covered.contains(&case), "{case}");
    }
}

#[test]
fn test_inverse_algorithm_has_same_case() {
    let criteria = SearchCriteria::new(true, CenterSafety::Solved);
    for (expected, algorithms) in reference_algorithms() {
        for alg in algorithms {
            let inverse = commutator_finder::MoveSequence::parse(&alg).unwrap().inverse();
            let mut cube = CubeState::new();
            cube.apply_sequence(&inverse);
            assert_eq!(cube.classify(&criteria), expected, "inverse of {alg}");
        }
    }
}

#[test]
fn test_reference_algorithms_decompose() {
    for (expected, algorithms) in reference_algorithms() {
        for alg in algorithms {
            let mut cube = CubeState::from_scramble(&alg).unwrap();
            let cycles = cube.solve_and_decompose(false);
            assert!(cube.is_solved(), "{alg}");
            if expected == Some(CaseType::AllSolved) {
                assert!(cycles.is_empty(), "{alg}: {cycles}");
            } else {
                assert!(cycles.ends_with('.'), "{alg}: {cycles}");
            }
        }
    }
}
