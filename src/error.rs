//! Crate-level error type: everything that can stop a run cold.

use thiserror::Error;

/// An unrecoverable fault at the simulation-driver level. Rejections
/// and agent faults never reach this far — only engine bugs and I/O
/// failures the sink couldn't swallow do.
#[derive(Debug, Error)]
pub enum SimError {
    /// The reporting sink could not be opened, rotated or flushed.
    #[error("reporting sink I/O error: {0}")]
    Reporting(#[from] std::io::Error),

    /// A CSV record could not be serialised.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// An engine invariant was violated — indicates a bug, not bad
    /// input; the run that hit it is aborted.
    #[error("engine invariant violated: {0}")]
    Invariant(String),
}
