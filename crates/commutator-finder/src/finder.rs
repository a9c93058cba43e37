//! Exhaustive commutator search.
//!
//! Enumerates commutators `[A, B] = A B A' B'` where A is a single move
//! and B is a canonical sequence of up to `max_moves_part_b` moves. Every
//! commutator whose result matches the search criteria is written to a
//! `ResultSink`, one line each:
//!
//! ```text
//! Bu-Fu.Db-Ub.: [M, u2]
//! UF-UB-DF.*: [M', U2]
//! ```
//!
//! The `*` marks results whose centers were moved within their faces and
//! reset before describing the cycles.

use std::path::{PathBuf, MAIN_SEPARATOR};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::criteria::{CaseType, CenterSafety, SearchCriteria};
use crate::cube::CubeState;
use crate::error::FinderError;
use crate::moves::{Move, NUM_MOVES};
use crate::sequence::SequenceEnumerator;
use crate::sink::ResultSink;

/// Iterations between progress clock checks
const PROGRESS_CHECK_EVERY: u64 = 1000;

/// Where results go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Every result in one file
    File(String),
    /// One file per case type and part B length, named
    /// `<dir><caseName><len>moves.txt`. The path keeps its trailing separator.
    Directory(String),
}

impl OutputTarget {
    /// A path ending in a separator is a directory, anything else a file
    pub fn from_path(path: &str) -> Result<Self, FinderError> {
        if path.is_empty() {
            return Err(FinderError::EmptyOutputPath);
        }
        if path.ends_with('/') || path.ends_with(MAIN_SEPARATOR) {
            Ok(OutputTarget::Directory(path.to_string()))
        } else {
            Ok(OutputTarget::File(path.to_string()))
        }
    }

    pub fn path(&self) -> &str {
        match self {
            OutputTarget::File(path) | OutputTarget::Directory(path) => path,
        }
    }

    /// Name results of `case` with a `part_b_len`-move part B are written to
    pub fn path_for(&self, case: CaseType, part_b_len: usize) -> String {
        match self {
            OutputTarget::File(path) => path.clone(),
            OutputTarget::Directory(dir) => format!("{}{}{}moves.txt", dir, case, part_b_len),
        }
    }
}

/// How commutators are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// `[A, B]`
    #[default]
    Bracket,
    /// `A B A' B'` spelled out move by move
    Expanded,
}

/// Configuration for the commutator finder
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Longest part B to try
    pub max_moves_part_b: usize,
    /// Case types to look for and the center policy
    pub criteria: SearchCriteria,
    pub output: OutputTarget,
    pub notation: Notation,
    /// Pause between attempts to write a result that failed to save
    pub retry_delay: Duration,
    /// Minimum time between progress log lines
    pub progress_interval: Duration,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_moves_part_b: 3,
            criteria: SearchCriteria::default(),
            output: OutputTarget::File("commutators.txt".to_string()),
            notation: Notation::Bracket,
            retry_delay: Duration::from_secs(10),
            progress_interval: Duration::from_secs(5),
        }
    }
}

/// Searches every `[A, B]` in enumeration order and records matches
pub struct CommutatorFinder<S: ResultSink> {
    config: FinderConfig,
    sink: S,
    part_a: Move,
    part_b: SequenceEnumerator,
    results: u64,
    results_before_part_a: u64,
    last_report: Instant,
}

impl<S: ResultSink> CommutatorFinder<S> {
    pub fn new(config: FinderConfig, sink: S) -> Result<Self, FinderError> {
        if config.output.path().is_empty() {
            return Err(FinderError::EmptyOutputPath);
        }
        if config.max_moves_part_b == 0 {
            return Err(FinderError::InvalidPartBLength(config.max_moves_part_b));
        }
        Ok(Self {
            config,
            sink,
            part_a: Move::FIRST,
            part_b: SequenceEnumerator::new(),
            results: 0,
            results_before_part_a: 0,
            last_report: Instant::now(),
        })
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Results recorded since the last reset
    pub fn results(&self) -> u64 {
        self.results
    }

    /// Run the whole search. Returns the number of commutators recorded.
    pub fn find(&mut self) -> Result<u64, FinderError> {
        self.reset()?;
        Ok(self.search())
    }

    /// Continue from the current part A to the last one
    fn search(&mut self) -> u64 {
        info!(
            "Begin commutator search. Max part B = {} moves. Results will be saved to {}",
            self.config.max_moves_part_b,
            match &self.config.output {
                OutputTarget::File(path) => path.clone(),
                OutputTarget::Directory(dir) => format!("{}*.txt", dir),
            }
        );

        let mut iterations: u64 = 0;
        loop {
            let mut state = CubeState::new();
            let part_b = self.part_b.current();
            state.apply_move(self.part_a);
            state.apply_sequence(part_b);
            state.apply_move(self.part_a.inverse());
            state.apply_sequence(&part_b.inverse());

            if let Some(case) = state.classify(&self.config.criteria) {
                self.record(case, state);
            }

            self.part_b.advance_skipping_pivot_adjacency(self.part_a);

            iterations += 1;
            if iterations % PROGRESS_CHECK_EVERY == 0 {
                self.report_progress();
            }

            if self.part_b.len() > self.config.max_moves_part_b {
                self.part_b.reset();
                let finished = self.part_a;
                match finished.successor() {
                    Some(next) => {
                        self.part_a = next;
                        self.report_part_a_done(finished);
                    }
                    None => {
                        info!(
                            "Found {} commutators [A, B] where B is up to {} moves. Results saved to {}",
                            self.results,
                            self.config.max_moves_part_b,
                            self.config.output.path()
                        );
                        return self.results;
                    }
                }
            }
        }
    }

    /// Rewind to the first commutator and clear outputs from earlier runs
    pub fn reset(&mut self) -> Result<(), FinderError> {
        self.results = 0;
        self.results_before_part_a = 0;
        self.part_a = Move::FIRST;
        self.part_b.reset();
        self.last_report = Instant::now();

        match &self.config.output {
            OutputTarget::File(path) => {
                self.sink.clear(path).map_err(|source| FinderError::Io {
                    path: PathBuf::from(path),
                    source,
                })?;
            }
            OutputTarget::Directory(_) => {
                for part_b_len in 1..=self.config.max_moves_part_b {
                    for case in CaseType::ALL {
                        let path = self.config.output.path_for(case, part_b_len);
                        let written = self
                            .sink
                            .read_all(&path)
                            .is_ok_and(|contents| !contents.is_empty());
                        if written {
                            debug!("Clearing {}", path);
                            self.sink.clear(&path).map_err(|source| FinderError::Io {
                                path: PathBuf::from(&path),
                                source,
                            })?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// The current commutator
    pub fn commutator(&self, notation: Notation) -> String {
        let part_b = self.part_b.current();
        match notation {
            Notation::Bracket => format!("[{}, {}]", self.part_a, part_b),
            Notation::Expanded => format!(
                "{} {} {} {}",
                self.part_a,
                part_b,
                self.part_a.inverse(),
                part_b.inverse()
            ),
        }
    }

    fn record(&mut self, case: CaseType, mut state: CubeState) {
        self.results += 1;
        let path = self.config.output.path_for(case, self.part_b.len());

        let mut delimiter = ": ";
        if !case.is_center_case()
            && !state.centers_solved()
            && self.config.criteria.center_safety() != CenterSafety::Strict
        {
            state.reset_centers();
            delimiter = "*: ";
        }
        let line = format!(
            "{}{}{}\n",
            state.solve_and_decompose(false),
            delimiter,
            self.commutator(self.config.notation)
        );
        debug!("{}: {}", case, line.trim_end());

        while let Err(err) = self.sink.append(&path, &line) {
            error!(
                "Failed to save to {}: {}. Retrying in {:?}",
                path, err, self.config.retry_delay
            );
            thread::sleep(self.config.retry_delay);
        }
    }

    fn report_progress(&mut self) {
        if self.last_report.elapsed() < self.config.progress_interval {
            return;
        }
        let progress = match self.part_b.progress() {
            Some(percent) => format!("{:.2}%", percent),
            None => "instant".to_string(),
        };
        info!(
            "Progress: part A = {} ({}/{}), part B {}/{} moves = {}. Total commutators: {}",
            self.part_a,
            self.part_a.index() + 1,
            NUM_MOVES,
            self.part_b.len(),
            self.config.max_moves_part_b,
            progress,
            self.results
        );
        self.last_report = Instant::now();
    }

    fn report_part_a_done(&mut self, finished: Move) {
        let found = self.results - self.results_before_part_a;
        self.results_before_part_a = self.results;
        info!(
            "Finished part A = {}, found {} commutators with part B up to {} moves. Total: {}",
            finished, found, self.config.max_moves_part_b, self.results
        );
        self.last_report = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn config(max_moves_part_b: usize, output: &str) -> FinderConfig {
        FinderConfig {
            max_moves_part_b,
            output: OutputTarget::from_path(output).unwrap(),
            retry_delay: Duration::from_millis(1),
            ..FinderConfig::default()
        }
    }

    #[test]
    fn test_output_target_from_path() {
        assert!(matches!(
            OutputTarget::from_path(""),
            Err(FinderError::EmptyOutputPath)
        ));
        assert_eq!(
            OutputTarget::from_path("out.txt").unwrap(),
            OutputTarget::File("out.txt".to_string())
        );
        let dir = OutputTarget::from_path("results/").unwrap();
        assert_eq!(dir, OutputTarget::Directory("results/".to_string()));
        assert_eq!(
            dir.path_for(CaseType::C3Cycles, 4),
            "results/c3cycles4moves.txt"
        );
        assert_eq!(
            OutputTarget::File("a.txt".to_string()).path_for(CaseType::AllSolved, 2),
            "a.txt"
        );
    }

    #[test]
    fn test_rejects_bad_config() {
        let mut empty = config(2, "out.txt");
        empty.output = OutputTarget::File(String::new());
        assert!(matches!(
            CommutatorFinder::new(empty, MemorySink::new()),
            Err(FinderError::EmptyOutputPath)
        ));

        assert!(matches!(
            CommutatorFinder::new(config(0, "out.txt"), MemorySink::new()),
            Err(FinderError::InvalidPartBLength(0))
        ));
    }

    #[test]
    fn test_commutator_notation() {
        let finder = CommutatorFinder::new(config(2, "out.txt"), MemorySink::new()).unwrap();
        assert_eq!(finder.commutator(Notation::Bracket), "[L, L]");
        assert_eq!(finder.commutator(Notation::Expanded), "L L L' L'");
    }

    #[test_log::test]
    fn test_finds_single_move_part_b() {
        let mut finder = CommutatorFinder::new(config(1, "out.txt"), MemorySink::new()).unwrap();
        let count = finder.find().unwrap();
        assert!(count > 0);
        assert_eq!(finder.results(), count);

        let contents = finder.sink().read_all("out.txt").unwrap();
        assert_eq!(contents.lines().count() as u64, count);
        assert!(contents.contains("[M', U2]"), "{contents}");
        for line in contents.lines() {
            assert!(line.contains(": ["), "{line}");
            assert!(line.ends_with(']'), "{line}");
        }
    }

    #[test_log::test]
    fn test_finds_two_move_part_b() {
        let mut finder = CommutatorFinder::new(config(2, "out.txt"), MemorySink::new()).unwrap();
        let count = finder.find().unwrap();
        assert!(count > 0);
        let contents = finder.sink().read_all("out.txt").unwrap();
        assert_eq!(contents.lines().count() as u64, count);
        assert!(contents.lines().any(|line| line.matches(' ').count() >= 3));
    }

    #[test_log::test]
    #[ignore = "slow: enumerates every three-move part B"]
    fn test_finds_three_move_part_b() {
        let mut finder = CommutatorFinder::new(config(3, "out.txt"), MemorySink::new()).unwrap();
        let count = finder.find().unwrap();
        assert!(count > 0);
        assert!(!finder.sink().read_all("out.txt").unwrap().is_empty());
    }

    #[test_log::test]
    fn test_expanded_notation() {
        let mut cfg = config(1, "out.txt");
        cfg.notation = Notation::Expanded;
        let mut finder = CommutatorFinder::new(cfg, MemorySink::new()).unwrap();
        finder.find().unwrap();
        let contents = finder.sink().read_all("out.txt").unwrap();
        assert!(contents.contains(": M' U2 M U2\n"), "{contents}");
        assert!(!contents.contains('['));
    }

    #[test_log::test]
    fn test_failed_writes_are_retried() {
        let mut sink = MemorySink::new();
        sink.fail_next_appends(3);
        let mut finder = CommutatorFinder::new(config(1, "out.txt"), sink).unwrap();
        let count = finder.find().unwrap();

        let sink = finder.into_sink();
        assert_eq!(sink.failed_appends(), 3);
        let contents = sink.read_all("out.txt").unwrap();
        assert_eq!(contents.lines().count() as u64, count);
    }

    #[test_log::test]
    fn test_directory_output() {
        let mut sink = MemorySink::new();
        sink.append("res/e3cycles1moves.txt", "stale\n").unwrap();
        let mut finder = CommutatorFinder::new(config(1, "res/"), sink).unwrap();
        let count = finder.find().unwrap();

        let sink = finder.into_sink();
        let contents = sink.read_all("res/e3cycles1moves.txt").unwrap();
        assert!(!contents.contains("stale"));
        assert!(contents.contains("[M', U2]"), "{contents}");

        let mut total = 0;
        for name in sink.names() {
            assert!(name.starts_with("res/") && name.ends_with("1moves.txt"), "{name}");
            total += sink.read_all(name).unwrap().lines().count() as u64;
        }
        assert_eq!(total, count);
    }

    #[test_log::test]
    fn test_rerun_clears_previous_results() {
        let mut finder = CommutatorFinder::new(config(1, "out.txt"), MemorySink::new()).unwrap();
        let first = finder.find().unwrap();
        let second = finder.find().unwrap();
        assert_eq!(first, second);
        let contents = finder.sink().read_all("out.txt").unwrap();
        assert_eq!(contents.lines().count() as u64, second);
    }

    #[test_log::test]
    fn test_last_part_a_with_three_move_part_b() {
        let mut finder = CommutatorFinder::new(config(3, "out.txt"), MemorySink::new()).unwrap();
        finder.reset().unwrap();
        finder.part_a = Move::LAST;
        let count = finder.search();
        assert!(count > 0);

        let contents = finder.sink().read_all("out.txt").unwrap();
        assert_eq!(contents.lines().count() as u64, count);
        assert!(contents.lines().all(|line| line.contains(": [S', ")));
        assert!(contents.lines().any(|line| {
            let (_, part_b) = line.rsplit_once(", ").unwrap();
            part_b.matches(' ').count() == 2
        }));
    }

    #[test_log::test]
    fn test_moved_centers_are_marked() {
        let mut finder = CommutatorFinder::new(config(1, "res/"), MemorySink::new()).unwrap();
        finder.find().unwrap();
        let sink = finder.into_sink();

        let e3 = sink.read_all("res/e3cycles1moves.txt").unwrap();
        assert!(e3.lines().any(|line| line == "UF-UB-DF.*: [M', U2]"), "{e3}");
        let t22 = sink.read_all("res/t22swaps1moves.txt").unwrap();
        assert!(t22.lines().any(|line| line == "Df-Uf.Bu-Fu.: [M', u2]"), "{t22}");

        let mut marked = 0;
        for case in CaseType::ALL {
            let Ok(contents) = sink.read_all(&format!("res/{}1moves.txt", case)) else {
                continue;
            };
            if case.is_center_case() {
                assert!(!contents.contains('*'), "{case}: {contents}");
            }
            marked += contents.lines().filter(|line| line.contains("*: ")).count();
        }
        assert_eq!(marked, 72);
    }

    #[test]
    fn test_progress_report_is_throttled() {
        let mut cfg = config(1, "out.txt");
        cfg.progress_interval = Duration::from_secs(3600);
        let mut finder = CommutatorFinder::new(cfg, MemorySink::new()).unwrap();
        let before = finder.last_report;
        finder.report_progress();
        assert_eq!(finder.last_report, before);

        finder.config.progress_interval = Duration::ZERO;
        thread::sleep(Duration::from_millis(2));
        finder.report_progress();
        assert!(finder.last_report > before);
    }

    #[test]
    fn test_part_a_summary_counts_per_move() {
        let mut finder = CommutatorFinder::new(config(1, "out.txt"), MemorySink::new()).unwrap();
        finder.results = 5;
        finder.report_part_a_done(Move::FIRST);
        assert_eq!(finder.results_before_part_a, 5);

        finder.results = 8;
        let before = finder.last_report;
        thread::sleep(Duration::from_millis(2));
        finder.report_part_a_done(Move::LAST);
        assert_eq!(finder.results_before_part_a, 8);
        assert!(finder.last_report > before);
    }

    #[test_log::test]
    fn test_strict_safety_never_marks_centers() {
        let mut cfg = config(1, "out.txt");
        cfg.criteria = SearchCriteria::all_but_solved(CenterSafety::Strict);
        let mut finder = CommutatorFinder::new(cfg, MemorySink::new()).unwrap();
        finder.find().unwrap();
        let contents = finder.sink().read_all("out.txt").unwrap_or_default();
        assert!(!contents.contains("*:"));
    }
}
