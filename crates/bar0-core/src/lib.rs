//! Decoder and rule engine for the NVMe controller register block (BAR0).

/// Static register schema, bit ranges and unit conversions.
pub mod schema;
pub use schema::{
    page_size_bytes, BitRange, FieldDescriptor, FieldId, Interpretation, RegisterAccess,
    RegisterDescriptor, RegisterId, RegisterWidth, BAR0_REGION_BYTES, BASE_PAGE_SIZE,
    REGISTER_SCHEMA, TIMEOUT_UNIT_MS,
};

/// Decoded register, field and diagnostic records.
pub mod register;
pub use register::{FieldRaw, Level, Register, RegisterField, RegisterValue, ValidationItem};

/// Fatal fault taxonomy.
pub mod error;
pub use error::{Bar0Error, FaultKind};

/// Little-endian register block decoder.
pub mod decoder;
pub use decoder::{decode, read_u32_le, read_u64_le};

/// Consistency rules over decoded registers.
pub mod validator;
pub use validator::{validate, MAX_DEFINED_COMMAND_SET, REQUIRED_REGISTERS};

/// Hex-dump and binary input handling.
pub mod ingest;
pub use ingest::{ingest, looks_like_text, parse_hex_dump, InputKind};

/// Decode-and-validate pipeline and report type.
pub mod report;
pub use report::{analyze_bytes, analyze_input, Bar0Report, DiagnosticCounts};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
