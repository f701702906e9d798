//! Register block decoder.
//!
//! Applies [`REGISTER_SCHEMA`] to a little-endian byte buffer and produces the
//! unvalidated register list.

use crate::error::Bar0Error;
use crate::register::{FieldRaw, Register, RegisterField, RegisterValue};
use crate::schema::{
    FieldDescriptor, RegisterAccess, RegisterDescriptor, RegisterWidth, BAR0_REGION_BYTES,
    REGISTER_SCHEMA,
};

/// Reads a little-endian `u32` at `offset`.
#[must_use]
pub fn read_u32_le(bytes: &[u8], offset: usize) -> Option<u32> {
    let window = bytes.get(offset..offset.checked_add(4)?)?;
    window.try_into().ok().map(u32::from_le_bytes)
}

/// Reads a little-endian `u64` at `offset`.
#[must_use]
pub fn read_u64_le(bytes: &[u8], offset: usize) -> Option<u64> {
    let window = bytes.get(offset..offset.checked_add(8)?)?;
    window.try_into().ok().map(u64::from_le_bytes)
}

/// Decodes the fixed register block at the start of `bytes`.
///
/// Bytes past the register block are ignored.
///
/// # Errors
///
/// Returns [`Bar0Error::InsufficientData`] when `bytes` is shorter than
/// [`BAR0_REGION_BYTES`]; no register is decoded in that case.
pub fn decode(bytes: &[u8]) -> Result<Vec<Register>, Bar0Error> {
    if bytes.len() < BAR0_REGION_BYTES {
        return Err(insufficient(bytes));
    }

    let registers = REGISTER_SCHEMA
        .iter()
        .map(|descriptor| decode_register(descriptor, bytes))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "decoded {} registers from {} byte buffer",
        registers.len(),
        bytes.len()
    );
    Ok(registers)
}

const fn insufficient(bytes: &[u8]) -> Bar0Error {
    Bar0Error::InsufficientData {
        required: BAR0_REGION_BYTES,
        found: bytes.len(),
    }
}

fn decode_register(descriptor: &RegisterDescriptor, bytes: &[u8]) -> Result<Register, Bar0Error> {
    let value = match (descriptor.access, descriptor.width) {
        (RegisterAccess::WriteOnly, _) => RegisterValue::WriteOnly,
        (RegisterAccess::Readable, RegisterWidth::Dword) => RegisterValue::Dword(
            read_u32_le(bytes, descriptor.offset).ok_or_else(|| insufficient(bytes))?,
        ),
        (RegisterAccess::Readable, RegisterWidth::Qword) => RegisterValue::Qword(
            read_u64_le(bytes, descriptor.offset).ok_or_else(|| insufficient(bytes))?,
        ),
    };

    let fields = descriptor
        .fields
        .iter()
        .filter_map(|field| decode_field(field, value))
        .collect();

    Ok(Register {
        id: descriptor.id,
        offset: descriptor.offset,
        size: descriptor.width.bytes(),
        name: descriptor.mnemonic(),
        value,
        description: descriptor.description,
        fields,
        diagnostics: Vec::new(),
    })
}

fn decode_field(descriptor: &FieldDescriptor, value: RegisterValue) -> Option<RegisterField> {
    let raw = match value {
        RegisterValue::Dword(value) => FieldRaw::Dword(descriptor.bits.extract_u32(value)),
        RegisterValue::Qword(value) => FieldRaw::Qword(descriptor.bits.extract_u64(value)),
        RegisterValue::WriteOnly => return None,
    };

    Some(RegisterField {
        id: descriptor.id,
        name: descriptor.name,
        bits: descriptor.bits,
        raw,
        interpretation: descriptor.interpretation.describe(raw.get()),
        diagnostics: Vec::new(),
    })
}
