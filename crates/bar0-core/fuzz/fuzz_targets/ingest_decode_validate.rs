#![no_main]

use bar0_core::{analyze_bytes, analyze_input, parse_hex_dump, Bar0Error, BAR0_REGION_BYTES};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match analyze_input(data) {
        Ok(report) => {
            assert!(report.total_bytes() >= BAR0_REGION_BYTES);
            assert_eq!(report.registers.len(), 10);
        }
        Err(Bar0Error::MissingRegister { .. }) => panic!("decoder dropped a required register"),
        Err(_) => {}
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_hex_dump(text);
    }

    if data.len() >= BAR0_REGION_BYTES {
        assert!(analyze_bytes(data.to_vec()).is_ok());
    }
});
