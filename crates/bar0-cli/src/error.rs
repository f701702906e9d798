use std::io;
use std::path::PathBuf;

use bar0_core::Bar0Error;
use thiserror::Error;

/// Faults that end a CLI run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// Standard input could not be read.
    #[error("failed to read standard input: {0}")]
    ReadStdin(#[source] io::Error),
    /// Standard input was empty.
    #[error("no input provided")]
    NoInput,
    /// Ingestion, decoding or validation fault.
    #[error(transparent)]
    Analysis(#[from] Bar0Error),
    /// Report could not be serialised.
    #[error("failed to serialise report: {0}")]
    Json(#[from] serde_json::Error),
    /// Rendered report could not be written.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),
}
