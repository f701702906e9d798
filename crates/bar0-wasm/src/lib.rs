//! WebAssembly bindings for the NVMe BAR0 register decoder.
//!
//! Reports cross into JavaScript with the same shape the CLI prints as JSON.

use bar0_core::{analyze_bytes, Bar0Error, Bar0Report};
use serde::Serialize;
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format!($($t)*))))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Parses hex-dump text, then decodes and validates it.
///
/// # Errors
///
/// Returns the ingestion or decoding fault.
pub fn analyze_hex_dump(text: &str) -> Result<Bar0Report, Bar0Error> {
    analyze_bytes(bar0_core::ingest::parse_hex_dump(text)?)
}

/// Decodes and validates a binary register block.
///
/// # Errors
///
/// Returns the decoding fault.
pub fn analyze_binary(bytes: &[u8]) -> Result<Bar0Report, Bar0Error> {
    analyze_bytes(bytes.to_vec())
}

fn to_js(result: Result<Bar0Report, Bar0Error>) -> Result<JsValue, JsValue> {
    let report = result.map_err(|fault| JsValue::from(js_sys::Error::new(&fault.to_string())))?;
    let counts = report.diagnostic_counts();
    console_log!(
        "decoded {} registers from {} bytes ({} errors, {} warnings, {} infos)",
        report.registers.len(),
        report.total_bytes(),
        counts.errors,
        counts.warnings,
        counts.infos
    );
    report
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Parses a hex dump and returns the annotated register report.
///
/// # Errors
///
/// Throws a JavaScript `Error` carrying the fault message.
#[wasm_bindgen(js_name = parseHexDump)]
pub fn parse_hex_dump(text: &str) -> Result<JsValue, JsValue> {
    to_js(analyze_hex_dump(text))
}

/// Decodes a binary register block and returns the annotated register report.
///
/// # Errors
///
/// Throws a JavaScript `Error` carrying the fault message.
#[wasm_bindgen(js_name = parseBinary)]
pub fn parse_binary(bytes: &[u8]) -> Result<JsValue, JsValue> {
    to_js(analyze_binary(bytes))
}
