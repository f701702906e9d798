//! Conversion of raw input into the byte buffer the decoder consumes.
//!
//! Two encodings are accepted: raw binary and the text produced by common
//! hex-dump tools, where each line may start with an address terminated by a
//! colon.

use crate::error::Bar0Error;

/// Encoding detected for an input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Printable text, parsed as a hex dump.
    HexDump,
    /// Anything else, used byte for byte.
    Binary,
}

impl InputKind {
    /// Classifies `data`: printable ASCII plus tab, LF and CR is text.
    #[must_use]
    pub fn detect(data: &[u8]) -> Self {
        if looks_like_text(data) {
            Self::HexDump
        } else {
            Self::Binary
        }
    }
}

/// Returns `true` when every byte is printable ASCII, tab, LF or CR.
#[must_use]
pub fn looks_like_text(data: &[u8]) -> bool {
    data.iter()
        .all(|byte| (0x20..=0x7E).contains(byte) || matches!(byte, b'\t' | b'\n' | b'\r'))
}

/// Parses hex-dump text into bytes.
///
/// On lines containing a colon, only the text between the first and second
/// colon is kept. Remaining tokens are whitespace-separated hex digit groups;
/// one-digit groups are left-padded with `0`. The concatenated digits are paired
/// into bytes and a trailing unpaired digit is dropped.
///
/// # Errors
///
/// Returns [`Bar0Error::InvalidHexDigit`] for the first character that is
/// neither a hex digit nor whitespace.
pub fn parse_hex_dump(text: &str) -> Result<Vec<u8>, Bar0Error> {
    let digits: String = text
        .split('\n')
        .map(|line| {
            if line.contains(':') {
                line.split(':').nth(1).unwrap_or_default()
            } else {
                line
            }
        })
        .flat_map(str::split_whitespace)
        .map(|token| {
            if token.chars().count() < 2 {
                format!("0{token}")
            } else {
                token.to_string()
            }
        })
        .collect();

    let nibbles = digits
        .chars()
        .map(|character| {
            character
                .to_digit(16)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(Bar0Error::InvalidHexDigit { character })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let bytes: Vec<u8> = nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect();
    log::debug!("parsed {} bytes from hex dump", bytes.len());
    Ok(bytes)
}

/// Converts raw input into bytes according to its detected encoding.
///
/// # Errors
///
/// Propagates [`parse_hex_dump`] failures for text input.
pub fn ingest(data: &[u8]) -> Result<Vec<u8>, Bar0Error> {
    match InputKind::detect(data) {
        InputKind::HexDump => parse_hex_dump(&String::from_utf8_lossy(data)),
        InputKind::Binary => Ok(data.to_vec()),
    }
}
