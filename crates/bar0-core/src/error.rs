use thiserror::Error;

/// Fault categories used by callers to pick a reporting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FaultKind {
    /// The supplied buffer cannot hold the register block.
    InputSize,
    /// Hex-dump text could not be converted to bytes.
    MalformedEncoding,
    /// Decoder and validator disagree about the register schema.
    InternalConsistency,
}

/// Fatal faults raised while ingesting, decoding or validating a register block.
///
/// Diagnostics about register contents are never reported through this type;
/// they are attached to the decoded registers instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Bar0Error {
    /// Buffer shorter than the fixed register block.
    #[error(
        "data is insufficient: at least {required} bytes are required, but only {found} were found"
    )]
    InsufficientData {
        /// Minimum accepted length.
        required: usize,
        /// Length actually supplied.
        found: usize,
    },
    /// Hex-dump text contained something other than hex digits and whitespace.
    #[error("input contains invalid hexadecimal character {character:?}")]
    InvalidHexDigit {
        /// First offending character.
        character: char,
    },
    /// A register required by validation was absent from the decoded list.
    #[error("required register {mnemonic} not found in decoded register list")]
    MissingRegister {
        /// Mnemonic of the absent register.
        mnemonic: &'static str,
    },
}

impl Bar0Error {
    /// Returns the fault category.
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::InsufficientData { .. } => FaultKind::InputSize,
            Self::InvalidHexDigit { .. } => FaultKind::MalformedEncoding,
            Self::MissingRegister { .. } => FaultKind::InternalConsistency,
        }
    }
}
