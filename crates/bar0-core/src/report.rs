//! End-to-end decode and validate pipeline.

use crate::decoder::decode;
use crate::error::Bar0Error;
use crate::ingest::ingest;
use crate::register::{Level, Register};
use crate::schema::RegisterId;
use crate::validator::validate;

/// Annotated register list together with the bytes it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar0Report {
    /// Validated registers in ascending offset order.
    pub registers: Vec<Register>,
    /// Complete input buffer, including bytes past the register block.
    pub bytes: Vec<u8>,
}

/// Per-level diagnostic totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiagnosticCounts {
    /// Number of error diagnostics.
    pub errors: usize,
    /// Number of warning diagnostics.
    pub warnings: usize,
    /// Number of info diagnostics.
    pub infos: usize,
}

impl DiagnosticCounts {
    /// Total number of diagnostics.
    #[must_use]
    pub const fn total(self) -> usize {
        self.errors + self.warnings + self.infos
    }
}

impl Bar0Report {
    /// Looks up a register by identity.
    #[must_use]
    pub fn register(&self, id: RegisterId) -> Option<&Register> {
        self.registers.iter().find(|register| register.id == id)
    }

    /// Number of input bytes.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Counts diagnostics across all registers and fields.
    #[must_use]
    pub fn diagnostic_counts(&self) -> DiagnosticCounts {
        self.registers
            .iter()
            .flat_map(Register::all_diagnostics)
            .fold(DiagnosticCounts::default(), |mut counts, item| {
                match item.level {
                    Level::Error => counts.errors += 1,
                    Level::Warning => counts.warnings += 1,
                    Level::Info => counts.infos += 1,
                }
                counts
            })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Bar0Report {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Bar0Report", 2)?;
        state.serialize_field("registers", &self.registers)?;
        state.serialize_field("totalBytes", &self.bytes.len())?;
        state.end()
    }
}

/// Decodes and validates a binary register block.
///
/// # Errors
///
/// Returns [`Bar0Error::InsufficientData`] for buffers shorter than the
/// register block, or an internal-consistency fault from validation.
pub fn analyze_bytes(bytes: Vec<u8>) -> Result<Bar0Report, Bar0Error> {
    let mut registers = decode(&bytes)?;
    validate(&mut registers)?;
    Ok(Bar0Report { registers, bytes })
}

/// Detects the input encoding, then decodes and validates it.
///
/// # Errors
///
/// Returns ingestion faults for malformed hex dumps in addition to the faults
/// of [`analyze_bytes`].
pub fn analyze_input(data: &[u8]) -> Result<Bar0Report, Bar0Error> {
    analyze_bytes(ingest(data)?)
}
