use std::path::PathBuf;

use thiserror::Error;

/// Crate-level result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejections produced while validating source text. None of these are
/// recoverable; nothing runs once one is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("source must not be empty")]
    EmptySource,

    #[error("source contains invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { position: usize, symbol: char },

    #[error("unmatched loop-close at position {0}")]
    UnmatchedLoopClose(usize),

    #[error("{0} unmatched loop-open(s) in program")]
    UnmatchedLoopOpen(usize),
}

/// Failures while running a validated program.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A bracket without a jump target made it past validation.
    #[error("internal error: no jump target for bracket at instruction {ip}")]
    UnresolvedJump { ip: usize },
}

/// Everything the front end can report.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("cannot read {}: {source}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exceeds the source size limit of {limit} bytes", .path.display())]
    SourceTooLarge { path: PathBuf, limit: usize },
}
