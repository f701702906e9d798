//! Command-line front end for the BAR0 decoder.

/// Argument definitions.
pub mod cli;
pub use cli::Cli;

/// CLI fault taxonomy.
pub mod error;
pub use error::CliError;

/// Stderr logger for the `log` facade.
pub mod logging;

/// Table and JSON renderers.
pub mod render;
pub use render::{byte_pairs, render_json, render_table, Table};

/// Input handling and the top-level run.
pub mod app;
pub use app::{failing_registers, read_input, report, run};

#[cfg(test)]
use tempfile as _;
