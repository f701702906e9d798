//! Validator integration suite: each rule in isolation plus whole-pipeline runs.

#![allow(clippy::pedantic, clippy::nursery)]

use bar0_core::{
    analyze_bytes, analyze_input, decode, validate, Bar0Error, FaultKind, FieldId, Level, Register,
    RegisterId, ValidationItem, BAR0_REGION_BYTES,
};
use log as _;
use proptest::prelude::*;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

const DUMP: &str = "\
00000000: ff ff 03 3c 30 00 00 00 00 04 01 00 00 00 00 00
00000010: 00 00 00 00 01 40 46 00 00 00 00 00 09 00 00 00
00000020: 00 00 00 00 1f 00 1f 00 00 c0 a4 ff 00 00 00 00
00000030: 00 d0 a4 ff 00 00 00 00 00 00 00 00 00 00 00 00
";

/// CAP: MQES 0x3FF, CSS NVM, MPSMIN 0, MPSMAX 4. VS 1.4.0. Queues of 32
/// entries at page-aligned addresses.
fn healthy_block() -> [u8; BAR0_REGION_BYTES] {
    let mut bytes = [0u8; BAR0_REGION_BYTES];
    bytes[0..8].copy_from_slice(&[0xFF, 0x03, 0x00, 0x3C, 0x20, 0x00, 0x40, 0x00]);
    bytes[8..12].copy_from_slice(&[0x00, 0x04, 0x01, 0x00]);
    bytes[0x24..0x28].copy_from_slice(&[0x1F, 0x00, 0x1F, 0x00]);
    bytes[0x28..0x30].copy_from_slice(&0x1000u64.to_le_bytes());
    bytes[0x30..0x38].copy_from_slice(&0x2000u64.to_le_bytes());
    bytes
}

fn validated(bytes: &[u8]) -> Vec<Register> {
    let mut registers = decode(bytes).expect("block decodes");
    validate(&mut registers).expect("all required registers present");
    registers
}

fn register(registers: &[Register], id: RegisterId) -> &Register {
    registers
        .iter()
        .find(|register| register.id == id)
        .expect("register decoded")
}

fn field_diagnostics(
    registers: &[Register],
    id: RegisterId,
    field: FieldId,
) -> Vec<ValidationItem> {
    register(registers, id)
        .field(field)
        .expect("field decoded")
        .diagnostics
        .clone()
}

fn total_diagnostics(registers: &[Register]) -> usize {
    registers
        .iter()
        .map(|register| register.all_diagnostics().count())
        .sum()
}

#[test]
fn healthy_block_is_silent() {
    let registers = validated(&healthy_block());
    assert_eq!(total_diagnostics(&registers), 0);
}

#[test]
fn reserved_bits_warn_once_with_bit_range() {
    let mut bytes = healthy_block();
    bytes[0x17] = 0x01;
    let registers = validated(&bytes);
    let diagnostics = field_diagnostics(&registers, RegisterId::Cc, FieldId::CcReserved1);
    assert_eq!(
        diagnostics,
        vec![ValidationItem::new(
            Level::Warning,
            "Reserved bit(s) (31:24) are not zero. (Value: 0x01)"
        )]
    );
    assert_eq!(total_diagnostics(&registers), 1);
}

#[test]
fn single_reserved_bit_is_cited_by_position() {
    let mut bytes = healthy_block();
    // CSTS bit 6 starts the reserved range 31:6
    bytes[0x1C] = 0x40;
    let registers = validated(&bytes);
    let diagnostics = field_diagnostics(&registers, RegisterId::Csts, FieldId::CstsReserved0);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("(31:6)"));
    assert!(diagnostics[0].message.ends_with("(Value: 0x01)"));
}

#[rstest]
#[case::all_zero([0x00; 8])]
#[case::all_one([0xFF; 8])]
fn cap_link_failure_patterns_are_errors(#[case] cap: [u8; 8]) {
    let mut bytes = healthy_block();
    bytes[0..8].copy_from_slice(&cap);
    let registers = validated(&bytes);
    assert_eq!(
        register(&registers, RegisterId::Cap).diagnostics,
        vec![ValidationItem::new(
            Level::Error,
            "CAP register has an invalid value. This may indicate a problem communicating with the device."
        )]
    );
}

#[test]
fn cap_with_only_outer_bytes_set_is_not_a_link_failure() {
    let mut bytes = healthy_block();
    bytes[0..8].copy_from_slice(&[0xFF, 0, 0, 0, 0, 0, 0, 0xFF]);
    let registers = validated(&bytes);
    assert!(register(&registers, RegisterId::Cap).diagnostics.is_empty());
}

#[test]
fn vs_all_ones_is_error_but_all_zero_is_not() {
    let mut bytes = healthy_block();
    bytes[8..12].copy_from_slice(&[0xFF; 4]);
    let registers = validated(&bytes);
    let vs = register(&registers, RegisterId::Vs);
    assert_eq!(vs.diagnostics.len(), 1);
    assert_eq!(vs.diagnostics[0].level, Level::Error);
    assert!(vs.diagnostics[0]
        .message
        .starts_with("VS register has an invalid value."));

    bytes[8..12].copy_from_slice(&[0x00; 4]);
    let registers = validated(&bytes);
    assert!(register(&registers, RegisterId::Vs).diagnostics.is_empty());
}

#[test]
fn fatal_status_is_error_and_ready_is_info() {
    let mut bytes = healthy_block();
    bytes[0x1C] = 0x03;
    let registers = validated(&bytes);

    let cfs = field_diagnostics(&registers, RegisterId::Csts, FieldId::CstsCfs);
    assert_eq!(cfs.len(), 1);
    assert_eq!(cfs[0].level, Level::Error);
    assert!(cfs[0].message.contains("CFS=1"));

    let rdy = field_diagnostics(&registers, RegisterId::Csts, FieldId::CstsRdy);
    assert_eq!(
        rdy,
        vec![ValidationItem::new(
            Level::Info,
            "The controller is reporting that it is ready to process commands (RDY = 1)."
        )]
    );
}

#[rstest]
#[case(0, false)]
#[case(1, false)]
#[case(4, false)]
#[case(5, true)]
#[case(15, true)]
fn page_size_must_lie_within_cap_bounds(#[case] mps: u16, #[case] flagged: bool) {
    let mut bytes = healthy_block();
    let cc = mps << 7;
    bytes[0x14..0x16].copy_from_slice(&cc.to_le_bytes());
    let registers = validated(&bytes);
    let diagnostics = field_diagnostics(&registers, RegisterId::Cc, FieldId::CcMps);
    assert_eq!(diagnostics.len(), usize::from(flagged));
    if flagged {
        assert_eq!(diagnostics[0].level, Level::Error);
    }
}

#[test]
fn page_size_below_minimum_cites_bounds() {
    let mut bytes = healthy_block();
    // MPSMIN = 1, MPSMAX = 4, MPS = 0
    bytes[6] = 0x41;
    let registers = validated(&bytes);
    let diagnostics = field_diagnostics(&registers, RegisterId::Cc, FieldId::CcMps);
    assert_eq!(
        diagnostics,
        vec![ValidationItem::new(
            Level::Error,
            "The selected Memory Page Size (4096 B) is outside the controller's capabilities (MPSMIN: 8192 B, MPSMAX: 65536 B)."
        )]
    );
}

#[test]
fn admin_queue_larger_than_mqes_is_single_error() {
    let mut bytes = healthy_block();
    // MQES = 15; ASQS = 16, ACQS = 15
    bytes[0..2].copy_from_slice(&[0x0F, 0x00]);
    bytes[0x24..0x28].copy_from_slice(&[0x10, 0x00, 0x0F, 0x00]);
    let registers = validated(&bytes);

    assert_eq!(
        field_diagnostics(&registers, RegisterId::Aqa, FieldId::AqaAsqs),
        vec![ValidationItem::new(
            Level::Error,
            "ASQS (17) exceeds the controller's maximum queue entries (CAP.MQES: 16)."
        )]
    );
    assert!(field_diagnostics(&registers, RegisterId::Aqa, FieldId::AqaAcqs).is_empty());
    assert_eq!(total_diagnostics(&registers), 1);
}

#[test]
fn zero_admin_queue_sizes_are_errors() {
    let mut bytes = healthy_block();
    bytes[0x24..0x28].copy_from_slice(&[0x00; 4]);
    let registers = validated(&bytes);
    assert_eq!(
        field_diagnostics(&registers, RegisterId::Aqa, FieldId::AqaAsqs),
        vec![ValidationItem::new(Level::Error, "ASQS must not be zero.")]
    );
    assert_eq!(
        field_diagnostics(&registers, RegisterId::Aqa, FieldId::AqaAcqs),
        vec![ValidationItem::new(Level::Error, "ACQS must not be zero.")]
    );
}

#[rstest]
#[case(0x1000, 0)]
#[case(0x0, 0)]
#[case(0xFFA4_C000, 0)]
#[case(0x1001, 1)]
#[case(0x1800, 1)]
fn submission_queue_base_must_be_page_aligned(#[case] address: u64, #[case] expected: usize) {
    let mut bytes = healthy_block();
    bytes[0x28..0x30].copy_from_slice(&address.to_le_bytes());
    let registers = validated(&bytes);
    let asq = register(&registers, RegisterId::Asq);
    assert_eq!(asq.diagnostics.len(), expected);
    assert!(register(&registers, RegisterId::Acq).diagnostics.is_empty());
}

#[test]
fn misaligned_completion_queue_names_register_and_page_size() {
    let mut bytes = healthy_block();
    bytes[0x30..0x38].copy_from_slice(&0x2001u64.to_le_bytes());
    let registers = validated(&bytes);
    assert_eq!(
        register(&registers, RegisterId::Acq).diagnostics,
        vec![ValidationItem::new(
            Level::Error,
            "ACQ address (0x0000000000002001) is not aligned to the Memory Page Size (4096B)."
        )]
    );
}

#[test]
fn alignment_follows_selected_page_size() {
    let mut bytes = healthy_block();
    // MPS = 1 selects 8 KiB pages; ASQ at 0x1000 is no longer aligned
    bytes[0x14] = 0x80;
    let registers = validated(&bytes);
    assert_eq!(register(&registers, RegisterId::Asq).diagnostics.len(), 1);
    assert!(register(&registers, RegisterId::Acq).diagnostics.is_empty());
}

#[test]
fn missing_required_register_is_internal_fault() {
    let mut registers = decode(&healthy_block()).expect("block decodes");
    registers.retain(|register| register.id != RegisterId::Aqa);
    let fault = validate(&mut registers).expect_err("AQA is required");
    assert_eq!(fault, Bar0Error::MissingRegister { mnemonic: "AQA" });
    assert_eq!(fault.kind(), FaultKind::InternalConsistency);
}

#[test]
fn reference_dump_end_to_end() {
    let report = analyze_input(DUMP.as_bytes()).expect("reference dump analyzes");
    assert_eq!(report.total_bytes(), 64);

    let counts = report.diagnostic_counts();
    assert_eq!((counts.errors, counts.warnings, counts.infos), (0, 0, 1));

    let csts = report.register(RegisterId::Csts).expect("CSTS");
    let rdy = csts.field(FieldId::CstsRdy).expect("RDY");
    assert_eq!(rdy.diagnostics[0].level, Level::Info);
}

#[test]
fn truncated_binary_reports_sizes() {
    let fault = analyze_bytes(vec![0xA5; 63]).expect_err("one byte short");
    assert_eq!(
        fault.to_string(),
        "data is insufficient: at least 64 bytes are required, but only 63 were found"
    );
    assert_eq!(fault.kind(), FaultKind::InputSize);
}

#[test]
fn malformed_dump_is_rejected_before_decoding() {
    let fault = analyze_input(b"00000000: ff zz 03 3c\n").expect_err("invalid digit");
    assert_eq!(fault.kind(), FaultKind::MalformedEncoding);
}

proptest! {
    #[test]
    fn property_full_blocks_always_validate(bytes in proptest::collection::vec(any::<u8>(), 64..96)) {
        let report = analyze_bytes(bytes.clone());
        prop_assert!(report.is_ok());
        prop_assert_eq!(report.expect("checked").total_bytes(), bytes.len());
    }

    #[test]
    fn property_reserved_fields_warn_iff_nonzero(bytes in proptest::collection::vec(any::<u8>(), 64..=64)) {
        let registers = validated(&bytes);
        for field in registers.iter().flat_map(|register| register.fields.iter()) {
            if field.is_reserved() {
                let expected = usize::from(field.raw.get() != 0);
                prop_assert_eq!(field.diagnostics.len(), expected);
                prop_assert!(field.diagnostics.iter().all(|item| item.level == Level::Warning));
                prop_assert!(field.interpretation.is_none());
            }
        }
    }

    #[test]
    fn property_validation_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 64..=64)) {
        prop_assert_eq!(validated(&bytes), validated(&bytes));
    }
}
