//! Cross-field consistency rules over a decoded register list.
//!
//! Every rule reads decoded values only and appends at most one diagnostic per
//! detected condition, so rules are independent of one another. Running
//! [`validate`] twice over the same list duplicates its diagnostics.

use crate::error::Bar0Error;
use crate::register::{Level, Register};
use crate::schema::{page_size_bytes, FieldId, RegisterId};

/// Registers whose absence is an internal-consistency fault, in the order
/// they are looked up.
pub const REQUIRED_REGISTERS: [RegisterId; 5] = [
    RegisterId::Cap,
    RegisterId::Vs,
    RegisterId::Cc,
    RegisterId::Csts,
    RegisterId::Aqa,
];

/// Highest defined `CC.CSS` selector value.
///
/// `CC.CSS` is three bits wide, so the warning guarded by this bound can never
/// fire for a decoded value.
pub const MAX_DEFINED_COMMAND_SET: u64 = 0x7;

/// Reserved code shared by `CC.SHN` and `CSTS.SHST`.
const RESERVED_SHUTDOWN_CODE: u64 = 3;

/// Positions of the registers the rules read, resolved once per pass.
#[derive(Debug, Clone, Copy)]
struct Layout {
    cap: usize,
    vs: usize,
    cc: usize,
    csts: usize,
    aqa: usize,
    asq: Option<usize>,
    acq: Option<usize>,
}

impl Layout {
    fn resolve(registers: &[Register]) -> Result<Self, Bar0Error> {
        let find = |id: RegisterId| registers.iter().position(|register| register.id == id);

        let mut required = [0; REQUIRED_REGISTERS.len()];
        for (slot, id) in required.iter_mut().zip(REQUIRED_REGISTERS) {
            let Some(index) = find(id) else {
                return Err(Bar0Error::MissingRegister {
                    mnemonic: id.mnemonic(),
                });
            };
            *slot = index;
        }
        let [cap, vs, cc, csts, aqa] = required;

        Ok(Self {
            cap,
            vs,
            cc,
            csts,
            aqa,
            asq: find(RegisterId::Asq),
            acq: find(RegisterId::Acq),
        })
    }
}

fn field_raw(registers: &[Register], index: usize, id: FieldId) -> Option<u64> {
    registers[index].field(id).map(|field| field.raw.get())
}

fn annotate_field(
    registers: &mut [Register],
    index: usize,
    id: FieldId,
    level: Level,
    message: String,
) {
    if let Some(field) = registers[index].field_mut(id) {
        field.push_diagnostic(level, message);
    }
}

/// Runs every consistency rule over `registers`, annotating them in place.
///
/// # Errors
///
/// Returns [`Bar0Error::MissingRegister`] when one of [`REQUIRED_REGISTERS`] is
/// absent. No diagnostics are attached in that case.
pub fn validate(registers: &mut [Register]) -> Result<(), Bar0Error> {
    let layout = Layout::resolve(registers)?;

    check_reserved_bits(registers);
    check_link_health(registers, layout);
    check_controller_status(registers, layout);
    check_page_size_bounds(registers, layout);
    check_command_set(registers, layout);
    check_shutdown_codes(registers, layout);
    check_admin_queue_sizes(registers, layout);
    check_queue_alignment(registers, layout);

    log::debug!(
        "validated {} registers, {} diagnostics",
        registers.len(),
        registers
            .iter()
            .map(|register| register.all_diagnostics().count())
            .sum::<usize>()
    );
    Ok(())
}

fn check_reserved_bits(registers: &mut [Register]) {
    for field in registers
        .iter_mut()
        .flat_map(|register| register.fields.iter_mut())
        .filter(|field| field.is_reserved() && field.raw.get() != 0)
    {
        let message = format!(
            "Reserved bit(s) ({}) are not zero. (Value: {})",
            field.bits, field.raw
        );
        field.push_diagnostic(Level::Warning, message);
    }
}

fn check_link_health(registers: &mut [Register], layout: Layout) {
    let cap = &mut registers[layout.cap];
    if cap.value.is_all_zeros() || cap.value.is_all_ones() {
        cap.push_diagnostic(
            Level::Error,
            "CAP register has an invalid value. This may indicate a problem communicating with the device.",
        );
    }

    let vs = &mut registers[layout.vs];
    if vs.value.is_all_ones() {
        vs.push_diagnostic(
            Level::Error,
            "VS register has an invalid value. This may indicate a problem communicating with the device.",
        );
    }
}

fn check_controller_status(registers: &mut [Register], layout: Layout) {
    if field_raw(registers, layout.csts, FieldId::CstsCfs) == Some(1) {
        annotate_field(
            registers,
            layout.csts,
            FieldId::CstsCfs,
            Level::Error,
            "Controller is reporting a fatal status (CFS=1). A reset is required.".to_string(),
        );
    }

    if field_raw(registers, layout.csts, FieldId::CstsRdy) == Some(1) {
        annotate_field(
            registers,
            layout.csts,
            FieldId::CstsRdy,
            Level::Info,
            "The controller is reporting that it is ready to process commands (RDY = 1)."
                .to_string(),
        );
    }
}

fn check_page_size_bounds(registers: &mut [Register], layout: Layout) {
    let (Some(mps), Some(min), Some(max)) = (
        field_raw(registers, layout.cc, FieldId::CcMps),
        field_raw(registers, layout.cap, FieldId::CapMpsmin),
        field_raw(registers, layout.cap, FieldId::CapMpsmax),
    ) else {
        return;
    };

    if mps < min || mps > max {
        let size = |exponent: u64| {
            page_size_bytes(exponent).map_or_else(
                || format!("2^{exponent} pages"),
                |bytes| format!("{bytes} B"),
            )
        };
        let message = format!(
            "The selected Memory Page Size ({}) is outside the controller's capabilities (MPSMIN: {}, MPSMAX: {}).",
            size(mps),
            size(min),
            size(max)
        );
        annotate_field(registers, layout.cc, FieldId::CcMps, Level::Error, message);
    }
}

fn check_command_set(registers: &mut [Register], layout: Layout) {
    let (Some(selected), Some(nvm_supported)) = (
        field_raw(registers, layout.cc, FieldId::CcCss),
        field_raw(registers, layout.cap, FieldId::CapCssNvm),
    ) else {
        return;
    };

    if selected == 0 && nvm_supported == 0 {
        annotate_field(
            registers,
            layout.cc,
            FieldId::CcCss,
            Level::Error,
            "NVM Command Set was selected, but it is not supported by CAP.CSS.".to_string(),
        );
    } else if selected > MAX_DEFINED_COMMAND_SET {
        // Unreachable for a 3-bit selector.
        annotate_field(
            registers,
            layout.cc,
            FieldId::CcCss,
            Level::Warning,
            format!("An undefined I/O Command Set (>0x{MAX_DEFINED_COMMAND_SET:X}) was selected."),
        );
    }
}

fn check_shutdown_codes(registers: &mut [Register], layout: Layout) {
    if field_raw(registers, layout.cc, FieldId::CcShn) == Some(RESERVED_SHUTDOWN_CODE) {
        annotate_field(
            registers,
            layout.cc,
            FieldId::CcShn,
            Level::Warning,
            "A reserved shutdown notification value (3) is set.".to_string(),
        );
    }

    if field_raw(registers, layout.csts, FieldId::CstsShst) == Some(RESERVED_SHUTDOWN_CODE) {
        annotate_field(
            registers,
            layout.csts,
            FieldId::CstsShst,
            Level::Warning,
            "Controller is in a reserved shutdown state (3).".to_string(),
        );
    }
}

fn check_admin_queue_sizes(registers: &mut [Register], layout: Layout) {
    let Some(max_entries) = field_raw(registers, layout.cap, FieldId::CapMqes) else {
        return;
    };

    for (id, name) in [(FieldId::AqaAsqs, "ASQS"), (FieldId::AqaAcqs, "ACQS")] {
        let Some(size) = field_raw(registers, layout.aqa, id) else {
            continue;
        };

        if size > max_entries {
            let message = format!(
                "{name} ({}) exceeds the controller's maximum queue entries (CAP.MQES: {}).",
                size + 1,
                max_entries + 1
            );
            annotate_field(registers, layout.aqa, id, Level::Error, message);
        }

        if size == 0 {
            annotate_field(
                registers,
                layout.aqa,
                id,
                Level::Error,
                format!("{name} must not be zero."),
            );
        }
    }
}

fn check_queue_alignment(registers: &mut [Register], layout: Layout) {
    let Some(exponent) = field_raw(registers, layout.cc, FieldId::CcMps) else {
        return;
    };
    let Some(page_size) = page_size_bytes(exponent) else {
        return;
    };

    for index in [layout.asq, layout.acq].into_iter().flatten() {
        let register = &mut registers[index];
        let Some(address) = register.value.as_u64() else {
            continue;
        };

        if address % page_size != 0 {
            let message = format!(
                "{} address (0x{address:016X}) is not aligned to the Memory Page Size ({page_size}B).",
                register.name
            );
            register.push_diagnostic(Level::Error, message);
        }
    }
}
