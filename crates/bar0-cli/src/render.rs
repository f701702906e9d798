//! Human-readable and JSON renderings of a [`Bar0Report`].

use std::fmt;

use bar0_core::{Bar0Report, Register, RegisterField, ValidationItem};

const BANNER_WIDTH: usize = 80;
const RULE_WIDTH: usize = 60;
const FIELD_NAME_WIDTH: usize = 12;
const BIT_RANGE_WIDTH: usize = 8;
const RESERVED_PLACEHOLDER: &str = "-";

/// Table view of a report, written through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Table<'a>(pub &'a Bar0Report);

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{banner}")?;
        writeln!(f, "NVMe BAR0 Register Block")?;
        writeln!(f, "{banner}")?;
        writeln!(f, "Total bytes parsed: {}", report.total_bytes())?;

        for register in &report.registers {
            writeln!(f)?;
            write_register(f, register, &report.bytes)?;
        }

        let counts = report.diagnostic_counts();
        writeln!(f)?;
        write!(
            f,
            "Summary: {} error(s), {} warning(s), {} info",
            counts.errors, counts.warnings, counts.infos
        )
    }
}

fn write_register(f: &mut fmt::Formatter<'_>, register: &Register, block: &[u8]) -> fmt::Result {
    writeln!(
        f,
        "[0x{:02X}] {} - {}",
        register.offset, register.name, register.description
    )?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(f, "Value: {}", register.value)?;
    if let Some(bytes) = register.raw_bytes(block) {
        writeln!(f, "Bytes: {}", byte_pairs(bytes))?;
    }

    if !register.diagnostics.is_empty() {
        writeln!(f, "Register Validation:")?;
        for item in &register.diagnostics {
            write_diagnostic(f, item, 2)?;
        }
    }

    if !register.fields.is_empty() {
        writeln!(f, "Fields:")?;
        for field in &register.fields {
            write_field(f, field)?;
        }
    }
    Ok(())
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &RegisterField) -> fmt::Result {
    let bits = field.bits.to_string();
    // Reserved ranges print a dash in place of their raw bits.
    let raw = if field.is_reserved() {
        RESERVED_PLACEHOLDER.to_string()
    } else {
        field.raw.to_string()
    };
    write!(
        f,
        "  {:<name$} [{bits:<range$}] = {raw}",
        field.name,
        name = FIELD_NAME_WIDTH,
        range = BIT_RANGE_WIDTH
    )?;
    if let Some(meaning) = &field.interpretation {
        write!(f, " ({meaning})")?;
    }
    writeln!(f)?;
    for item in &field.diagnostics {
        write_diagnostic(f, item, 4)?;
    }
    Ok(())
}

fn write_diagnostic(
    f: &mut fmt::Formatter<'_>,
    item: &ValidationItem,
    indent: usize,
) -> fmt::Result {
    writeln!(f, "{:indent$}{item}", "")
}

/// Lowercase, space-separated byte pairs.
#[must_use]
pub fn byte_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the report as the table printed by default.
#[must_use]
pub fn render_table(report: &Bar0Report) -> String {
    Table(report).to_string()
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Propagates serialiser failures.
pub fn render_json(report: &Bar0Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
