use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the ledger consistency engine.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    /// The outer snapshot document could not be read or decoded. Dangling
    /// references inside an otherwise readable document are tolerated and
    /// never produce this error.
    #[error("Snapshot unreadable: {0}")]
    Integrity(String),
    #[error("Cannot delete {entity}: {count} linked transaction(s)")]
    DeleteBlocked { entity: &'static str, count: usize },
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("At least one ledger must remain")]
    LastLedger,
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}
