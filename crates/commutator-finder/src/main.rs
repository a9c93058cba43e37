//! CLI entry point for the commutator finder.
//!
//! Usage:
//!   commfinder find <OUTPUT> <MAX_MOVES> [options]
//!   commfinder solve <SCRAMBLE> [--max-depth <n>]
//!   commfinder inspect <SCRAMBLE> [--center-safety <policy>]
//!
//! `OUTPUT` is either a file, which receives every result, or a directory
//! ending in `/`, which receives one file per case type and part B length.
//!
//! Options for `find`:
//!   --center-safety <p>  ignore, solved or strict (default: solved)
//!   --criteria <FILE>    JSON criteria file; overrides --center-safety
//!   --expanded           Write `A B A' B'` instead of `[A, B]`
//!   -v                   More logging (can be repeated)

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use env_logger::TimestampPrecision;
use log::{error, LevelFilter};
use serde::Serialize;

use commutator_finder::{
    solve, CaseType, CenterSafety, CommutatorFinder, CriteriaFile, CubeState, FileSink,
    FinderConfig, FinderError, MoveSequence, Notation, OutputTarget, SearchCriteria,
    SolverConfig, MAX_SEQUENCE_LEN,
};

#[derive(Parser)]
#[command(name = "commfinder")]
#[command(about = "Exhaustive commutator search and brute-force solver for the 5x5 cube")]
#[command(version)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search commutators [A, B] and save the interesting ones
    Find {
        /// Output file, or directory ending in '/' for one file per case type
        #[arg(value_name = "OUTPUT")]
        output: String,

        /// Maximum number of moves in part B
        #[arg(value_name = "MAX_MOVES")]
        max_moves: usize,

        /// How much results may disturb the centers
        #[arg(long, value_enum, default_value_t = SafetyArg::Solved)]
        center_safety: SafetyArg,

        /// JSON file listing the case types to search for
        #[arg(long, value_name = "FILE")]
        criteria: Option<PathBuf>,

        /// Write commutators move by move instead of in bracket notation
        #[arg(long)]
        expanded: bool,
    },
    /// Find the shortest sequence solving a scramble
    Solve {
        /// Space separated moves, e.g. "R U R'"
        scramble: String,

        /// Longest sequence to try
        #[arg(long, default_value_t = MAX_SEQUENCE_LEN)]
        max_depth: usize,
    },
    /// Classify and describe the state a scramble produces
    Inspect {
        /// Space separated moves, e.g. "M' U2 M U2"
        scramble: String,

        /// Center policy used for classification
        #[arg(long, value_enum, default_value_t = SafetyArg::Solved)]
        center_safety: SafetyArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SafetyArg {
    Ignore,
    Solved,
    Strict,
}

impl From<SafetyArg> for CenterSafety {
    fn from(arg: SafetyArg) -> Self {
        match arg {
            SafetyArg::Ignore => CenterSafety::Ignore,
            SafetyArg::Solved => CenterSafety::Solved,
            SafetyArg::Strict => CenterSafety::Strict,
        }
    }
}

/// Output format for `solve`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    scramble: String,
    solved: bool,
    solution: Option<String>,
    sequences_tested: u64,
    depth_reached: usize,
    time_elapsed_ms: u64,
}

/// Output format for `inspect`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectOutput {
    scramble: String,
    case_type: Option<CaseType>,
    cycles: String,
    unsolved_elements: String,
    is_solved: bool,
    centers_safe: bool,
    centers_solved: bool,
    total_mismatches: usize,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match cli.command {
        Commands::Find {
            output,
            max_moves,
            center_safety,
            criteria,
            expanded,
        } => {
            let notation = if expanded {
                Notation::Expanded
            } else {
                Notation::Bracket
            };
            match run_find(&output, max_moves, center_safety.into(), criteria, notation) {
                Ok(count) => println!("{}", count),
                Err(e) => {
                    error!("{}", e);
                    process::exit(1);
                }
            }
        }
        Commands::Solve {
            scramble,
            max_depth,
        } => {
            let state = parse_scramble(&scramble);
            let result = solve(&state, &SolverConfig { max_depth });
            let output = SolveOutput {
                scramble,
                solved: result.is_solved(),
                solution: result.solution.as_ref().map(MoveSequence::to_string),
                sequences_tested: result.sequences_tested,
                depth_reached: result.depth_reached,
                time_elapsed_ms: result.time_elapsed_ms,
            };
            print_json(&output);
            process::exit(if result.is_solved() { 0 } else { 1 });
        }
        Commands::Inspect {
            scramble,
            center_safety,
        } => {
            let state = parse_scramble(&scramble);
            let criteria = SearchCriteria::new(true, center_safety.into());
            let output = InspectOutput {
                case_type: state.classify(&criteria),
                cycles: state.clone().solve_and_decompose(false),
                unsolved_elements: state.unsolved_elements().trim_end().to_string(),
                is_solved: state.is_solved(),
                centers_safe: state.centers_safe(),
                centers_solved: state.centers_solved(),
                total_mismatches: state.total_mismatches(),
                scramble,
            };
            print_json(&output);
        }
    }
}

fn run_find(
    output: &str,
    max_moves: usize,
    center_safety: CenterSafety,
    criteria_path: Option<PathBuf>,
    notation: Notation,
) -> Result<u64, FinderError> {
    let criteria = match criteria_path {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .map_err(|source| FinderError::CriteriaRead { path, source })?;
            CriteriaFile::from_json(&json)?.into_criteria()
        }
        None => SearchCriteria::all_but_solved(center_safety),
    };

    let output = OutputTarget::from_path(output)?;
    if let OutputTarget::Directory(dir) = &output {
        fs::create_dir_all(dir).map_err(|source| FinderError::Io {
            path: PathBuf::from(dir),
            source,
        })?;
    }

    let config = FinderConfig {
        max_moves_part_b: max_moves,
        criteria,
        output,
        notation,
        ..FinderConfig::default()
    };
    let mut finder = CommutatorFinder::new(config, FileSink)?;
    finder.find()
}

fn parse_scramble(scramble: &str) -> CubeState {
    match CubeState::from_scramble(scramble) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error parsing scramble: {}", e);
            process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(output: &T) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error formatting output: {}", e);
            process::exit(1);
        }
    }
}
