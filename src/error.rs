use std::path::PathBuf;
use thiserror::Error;

/// Reasons a single `x, y, z @ vx, vy, vz` line is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HailstoneParsingError {
    #[error("expected position and velocity separated by '@'")]
    MissingVelocity,
    #[error("expected three comma separated values")]
    MissingElements,
    #[error("more than three comma separated values")]
    ExtraElements,
    #[error("invalid integer: {0}")]
    InvalidNum(#[from] std::num::ParseIntError),
}

#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read input near line {line}: {source}")]
    Io { line: usize, source: std::io::Error },
    #[error("bad input at line {line}: {raw:?} ({source})")]
    Hailstone {
        line: usize,
        raw: String,
        source: HailstoneParsingError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("No solutions found")]
    NoSolution,
    #[error("Multiple solutions found (rank {rank} of 6)")]
    Ambiguous { rank: usize },
}
