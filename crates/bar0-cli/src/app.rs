//! Reads the input, runs the analysis and writes the rendered report.

use std::fs;
use std::io::{Read, Write};

use bar0_core::{analyze_input, Bar0Report};

use crate::cli::Cli;
use crate::error::CliError;
use crate::render::{render_json, render_table};

/// Reads the raw input named by `cli`, falling back to `stdin`.
///
/// # Errors
///
/// Returns [`CliError::ReadFile`] or [`CliError::ReadStdin`] on I/O failure and
/// [`CliError::NoInput`] when standard input is empty.
pub fn read_input(cli: &Cli, stdin: &mut impl Read) -> Result<Vec<u8>, CliError> {
    if let Some(path) = cli.input_path() {
        log::debug!("reading {}", path.display());
        return fs::read(path).map_err(|source| CliError::ReadFile {
            path: path.to_path_buf(),
            source,
        });
    }

    let mut data = Vec::new();
    stdin.read_to_end(&mut data).map_err(CliError::ReadStdin)?;
    if data.is_empty() {
        return Err(CliError::NoInput);
    }
    log::debug!("read {} bytes from standard input", data.len());
    Ok(data)
}

/// Analyzes the input and renders the report in the selected format.
///
/// # Errors
///
/// Propagates read, analysis and serialisation faults.
pub fn report(cli: &Cli, stdin: &mut impl Read) -> Result<(Bar0Report, String), CliError> {
    let data = read_input(cli, stdin)?;
    let report = analyze_input(&data)?;
    let rendered = if cli.json {
        render_json(&report)?
    } else {
        render_table(&report)
    };
    Ok((report, rendered))
}

/// Runs one invocation. Diagnostics never make a run fail.
///
/// # Errors
///
/// Returns any fatal fault; the caller maps it to exit status 1.
pub fn run(cli: &Cli, stdin: &mut impl Read, stdout: &mut impl Write) -> Result<(), CliError> {
    let (report, rendered) = report(cli, stdin)?;
    let counts = report.diagnostic_counts();
    log::debug!(
        "{} diagnostics: {} errors, {} warnings, {} infos",
        counts.total(),
        counts.errors,
        counts.warnings,
        counts.infos
    );
    let failing = failing_registers(&report);
    if !failing.is_empty() {
        log::debug!("registers with errors: {}", failing.join(", "));
    }
    writeln!(stdout, "{rendered}").map_err(CliError::WriteOutput)
}

/// Names of the registers whose own or field diagnostics include an error.
#[must_use]
pub fn failing_registers(report: &Bar0Report) -> Vec<&'static str> {
    report
        .registers
        .iter()
        .filter(|register| register.has_errors())
        .map(|register| register.name)
        .collect()
}
