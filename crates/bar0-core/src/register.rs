//! Decoded register, field and diagnostic records.

use core::fmt;

use crate::schema::{BitRange, FieldId, RegisterId, RegisterWidth};

/// Raw register value tagged with its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterValue {
    /// Value of a 32-bit register.
    Dword(u32),
    /// Value of a 64-bit register.
    Qword(u64),
    /// Write-only register; no readable value.
    WriteOnly,
}

impl RegisterValue {
    /// Returns the value widened to 64 bits, or `None` for write-only registers.
    #[must_use]
    pub const fn as_u64(self) -> Option<u64> {
        match self {
            Self::Dword(value) => Some(value as u64),
            Self::Qword(value) => Some(value),
            Self::WriteOnly => None,
        }
    }

    /// Returns `true` when every bit of the value is clear.
    #[must_use]
    pub const fn is_all_zeros(self) -> bool {
        matches!(self, Self::Dword(0) | Self::Qword(0))
    }

    /// Returns `true` when every bit of the value is set at its native width.
    #[must_use]
    pub const fn is_all_ones(self) -> bool {
        matches!(self, Self::Dword(u32::MAX) | Self::Qword(u64::MAX))
    }
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dword(value) => write!(f, "0x{value:08X}"),
            Self::Qword(value) => write!(f, "0x{value:016X}"),
            Self::WriteOnly => f.write_str("N/A"),
        }
    }
}

/// Raw field value carried at the parent register's native width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRaw {
    /// Field of a 32-bit register.
    Dword(u32),
    /// Field of a 64-bit register.
    Qword(u64),
}

impl FieldRaw {
    /// Returns the raw value widened to 64 bits.
    #[must_use]
    pub const fn get(self) -> u64 {
        match self {
            Self::Dword(value) => value as u64,
            Self::Qword(value) => value,
        }
    }

    /// Returns the width of the owning register.
    #[must_use]
    pub const fn width(self) -> RegisterWidth {
        match self {
            Self::Dword(_) => RegisterWidth::Dword,
            Self::Qword(_) => RegisterWidth::Qword,
        }
    }
}

impl fmt::Display for FieldRaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.get())
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Register-rule violation or device-health problem.
    Error,
    /// Non-fatal anomaly.
    Warning,
    /// Observational note.
    Info,
}

impl Level {
    /// Upper-case tag used by text renderers.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// One leveled diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationItem {
    /// Severity.
    pub level: Level,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationItem {
    /// Creates a diagnostic.
    #[must_use]
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level.tag(), self.message)
    }
}

/// Decoded sub-field of a register.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterField {
    /// Structured identity.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: FieldId,
    /// Field mnemonic.
    pub name: &'static str,
    /// Bit range within the parent register.
    pub bits: BitRange,
    /// Extracted value.
    pub raw: FieldRaw,
    /// Decoded meaning, absent for reserved ranges.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "value", skip_serializing_if = "Option::is_none")
    )]
    pub interpretation: Option<String>,
    /// Diagnostics attached by validation.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "validation", skip_serializing_if = "Vec::is_empty")
    )]
    pub diagnostics: Vec<ValidationItem>,
}

impl RegisterField {
    /// Returns `true` when this field covers a reserved bit range.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        self.id.is_reserved()
    }

    /// Appends a diagnostic to this field.
    pub fn push_diagnostic(&mut self, level: Level, message: impl Into<String>) {
        let item = ValidationItem::new(level, message);
        log::trace!("{} [{}] {item}", self.name, self.bits);
        self.diagnostics.push(item);
    }
}

/// Decoded register with its fields and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Register {
    /// Structured identity.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: RegisterId,
    /// Byte offset within the register block.
    pub offset: usize,
    /// Width in bytes.
    pub size: usize,
    /// Register mnemonic.
    pub name: &'static str,
    /// Raw value.
    pub value: RegisterValue,
    /// Long register name.
    pub description: &'static str,
    /// Decoded fields in ascending bit order.
    pub fields: Vec<RegisterField>,
    /// Register-level diagnostics attached by validation.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "validation", skip_serializing_if = "Vec::is_empty")
    )]
    pub diagnostics: Vec<ValidationItem>,
}

impl Register {
    /// Looks up a decoded field by identity.
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&RegisterField> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Looks up a decoded field by identity for annotation.
    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut RegisterField> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    /// Appends a register-level diagnostic.
    pub fn push_diagnostic(&mut self, level: Level, message: impl Into<String>) {
        let item = ValidationItem::new(level, message);
        log::trace!("{} {item}", self.name);
        self.diagnostics.push(item);
    }

    /// Iterates over register-level and field-level diagnostics.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &ValidationItem> + '_ {
        let field_items = self.fields.iter().flat_map(|field| &field.diagnostics);
        self.diagnostics.iter().chain(field_items)
    }

    /// Returns `true` when this register or any of its fields carries an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.all_diagnostics()
            .any(|item| item.level == Level::Error)
    }

    /// Returns the bytes backing this register within `block`.
    #[must_use]
    pub fn raw_bytes<'a>(&self, block: &'a [u8]) -> Option<&'a [u8]> {
        block.get(self.offset..self.offset + self.size)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RegisterValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Dword(value) => serializer.serialize_u32(*value),
            Self::Qword(value) => serializer.collect_str(value),
            Self::WriteOnly => serializer.serialize_str("N/A"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldRaw {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Dword(value) => serializer.serialize_u32(*value),
            Self::Qword(value) => serializer.collect_str(value),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BitRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
