//! Errors surfaced to the operator.
//!
//! Every variant renders as a single line; the console adds the severity tag.

use std::io;
use std::path::PathBuf;

use crate::engine::EngineError;

/// Why a command (or one of its steps) failed.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// The orchestration engine, or one of its sub-commands, cannot be invoked.
    #[error("{program} is not available: {reason}")]
    MissingBinary { program: String, reason: String },

    #[error("{what} not found at {}", path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    #[error("missing certificate files in {}: {}", dir.display(), missing.join(", "))]
    MissingCertificates { dir: PathBuf, missing: Vec<String> },

    #[error("{0}")]
    InvalidInput(String),

    /// An engine call or subprocess failed. The prefix names the step.
    #[error("{context}: {source}")]
    ExternalFailure {
        context: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("backup incomplete: {} failed", failed.join(" and "))]
    PartialFailure { failed: Vec<&'static str> },

    #[error("{failed} of {total} checks failed")]
    CheckFailed { failed: usize, total: usize },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("secure random source failed: {0}")]
    Random(#[from] rand::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StackError {
    /// Wrap an engine error with the step that produced it.
    pub fn external(context: &'static str, source: EngineError) -> Self {
        Self::ExternalFailure { context, source }
    }
}
