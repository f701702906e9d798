//! Fixed BAR0 register schema and bit-layout tables.
//!
//! Every register the decoder knows about is described here as static data:
//! byte offset, access width, long name and an ordered list of field
//! descriptors. Layout invariants (ascending offsets, in-bounds registers and
//! gap-free field partitions) are checked at compile time.

/// Size in bytes of the decoded controller register block.
pub const BAR0_REGION_BYTES: usize = 64;
/// Base memory page size that page-size exponents scale from.
pub const BASE_PAGE_SIZE: u64 = 4096;
/// Milliseconds represented by one unit of `CAP.TO`.
pub const TIMEOUT_UNIT_MS: u64 = 500;

const SHUTDOWN_NOTIFICATION_LABELS: [&str; 4] = [
    "No notification",
    "Normal shutdown",
    "Abrupt shutdown",
    "Reserved",
];

const SHUTDOWN_STATUS_LABELS: [&str; 4] = [
    "Normal",
    "Shutdown occurring",
    "Shutdown complete",
    "Reserved",
];

/// Native access width of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterWidth {
    /// 32-bit register.
    Dword,
    /// 64-bit register.
    Qword,
}

impl RegisterWidth {
    /// Returns the width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Dword => 4,
            Self::Qword => 8,
        }
    }

    /// Returns the width in bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Dword => 32,
            Self::Qword => 64,
        }
    }
}

/// Host-visible access policy of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterAccess {
    /// The register holds a readable value.
    Readable,
    /// Writes trigger an action; reads carry no meaningful value.
    WriteOnly,
}

/// Registers of the controller register block, in ascending offset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterId {
    /// Controller Capabilities.
    Cap,
    /// Version.
    Vs,
    /// Interrupt Mask Set.
    Intms,
    /// Interrupt Mask Clear.
    Intmc,
    /// Controller Configuration.
    Cc,
    /// Controller Status.
    Csts,
    /// NVM Subsystem Reset.
    Nssr,
    /// Admin Queue Attributes.
    Aqa,
    /// Admin Submission Queue Base Address.
    Asq,
    /// Admin Completion Queue Base Address.
    Acq,
}

impl RegisterId {
    /// Returns the short register mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Cap => "CAP",
            Self::Vs => "VS",
            Self::Intms => "INTMS",
            Self::Intmc => "INTMC",
            Self::Cc => "CC",
            Self::Csts => "CSTS",
            Self::Nssr => "NSSR",
            Self::Aqa => "AQA",
            Self::Asq => "ASQ",
            Self::Acq => "ACQ",
        }
    }

    /// Returns the static schema entry for this register.
    #[must_use]
    pub const fn descriptor(self) -> &'static RegisterDescriptor {
        match self {
            Self::Cap => &CAP_REGISTER,
            Self::Vs => &VS_REGISTER,
            Self::Intms => &INTMS_REGISTER,
            Self::Intmc => &INTMC_REGISTER,
            Self::Cc => &CC_REGISTER,
            Self::Csts => &CSTS_REGISTER,
            Self::Nssr => &NSSR_REGISTER,
            Self::Aqa => &AQA_REGISTER,
            Self::Asq => &ASQ_REGISTER,
            Self::Acq => &ACQ_REGISTER,
        }
    }
}

/// Named sub-fields of the decoded registers.
///
/// Variants are prefixed with their owning register so validation rules can
/// reference a field without searching by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FieldId {
    CapMqes,
    CapCqr,
    CapAmsWrr,
    CapAmsVs,
    CapReserved0,
    CapTo,
    CapDstrd,
    CapNssrs,
    CapCssNvm,
    CapReserved1,
    CapBps,
    CapReserved2,
    CapMpsmin,
    CapMpsmax,
    CapReserved3,
    VsTer,
    VsMnr,
    VsMjr,
    CcEn,
    CcReserved0,
    CcCss,
    CcMps,
    CcAms,
    CcShn,
    CcIosqes,
    CcIocqes,
    CcReserved1,
    CstsRdy,
    CstsCfs,
    CstsShst,
    CstsNssro,
    CstsPp,
    CstsReserved0,
    AqaAsqs,
    AqaReserved0,
    AqaAcqs,
    AqaReserved1,
}

impl FieldId {
    /// Returns `true` for bit ranges with no defined meaning.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        matches!(
            self,
            Self::CapReserved0
                | Self::CapReserved1
                | Self::CapReserved2
                | Self::CapReserved3
                | Self::CcReserved0
                | Self::CcReserved1
                | Self::CstsReserved0
                | Self::AqaReserved0
                | Self::AqaReserved1
        )
    }
}

/// Inclusive bit range `high:low` within a register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRange {
    /// Most significant bit, inclusive.
    pub high: u8,
    /// Least significant bit, inclusive.
    pub low: u8,
}

impl BitRange {
    /// Creates a multi-bit range.
    #[must_use]
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    /// Creates a single-bit range.
    #[must_use]
    pub const fn bit(index: u8) -> Self {
        Self {
            high: index,
            low: index,
        }
    }

    /// Number of bits covered.
    #[must_use]
    pub const fn width(self) -> u8 {
        self.high - self.low + 1
    }

    /// Right-aligned mask for the range width.
    #[must_use]
    pub const fn mask(self) -> u64 {
        if self.width() >= 64 {
            u64::MAX
        } else {
            (1u64 << self.width()) - 1
        }
    }

    /// Mask of the range in register position.
    #[must_use]
    pub const fn positioned_mask(self) -> u64 {
        self.mask() << self.low
    }

    /// Extracts the range from a 64-bit register value.
    #[must_use]
    pub const fn extract_u64(self, value: u64) -> u64 {
        (value >> self.low) & self.mask()
    }

    /// Extracts the range from a 32-bit register value.
    #[must_use]
    pub const fn extract_u32(self, value: u32) -> u32 {
        let mask = if self.width() >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width()) - 1
        };
        (value >> self.low) & mask
    }
}

impl core::fmt::Display for BitRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.high == self.low {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}:{}", self.high, self.low)
        }
    }
}

/// Rule turning a raw field value into human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpretation {
    /// Reserved range; no interpretation.
    Reserved,
    /// Stored as count minus one: `"{raw + 1} entries"`.
    EntryCount,
    /// Timeout in 500 ms units.
    TimeoutMs,
    /// Doorbell stride, `4 << raw` bytes.
    DoorbellStride,
    /// Memory page size, `4096 * 2^raw` bytes.
    PageSize,
    /// Queue entry size, `2^raw` bytes.
    EntrySize,
    /// Plain decimal number.
    Decimal,
    /// `Yes` / `No`.
    YesNo,
    /// `"{label}: Supported"` / `"{label}: Not Supported"`.
    Support {
        /// Feature label.
        label: &'static str,
    },
    /// Two-state flag with explicit labels.
    State {
        /// Text when the bit is set.
        set: &'static str,
        /// Text when the bit is clear.
        clear: &'static str,
    },
    /// Hex selector with a short legend, e.g. `"0x0 (0=NVM)"`.
    Selector {
        /// Legend appended after the value.
        legend: &'static str,
    },
    /// Enumerated two-bit code.
    Lookup {
        /// Labels indexed by raw value.
        labels: &'static [&'static str; 4],
    },
}

impl Interpretation {
    /// Renders the interpretation of `raw`, or `None` for reserved ranges.
    #[must_use]
    pub fn describe(self, raw: u64) -> Option<String> {
        match self {
            Self::Reserved => None,
            Self::EntryCount => Some(format!("{} entries", raw.saturating_add(1))),
            Self::TimeoutMs => Some(format!("{} ms", raw.saturating_mul(TIMEOUT_UNIT_MS))),
            Self::DoorbellStride => power_of_two(raw)
                .and_then(|factor| factor.checked_mul(4))
                .map(|bytes| format!("{bytes} bytes")),
            Self::PageSize => page_size_bytes(raw).map(|bytes| format!("{bytes} B")),
            Self::EntrySize => power_of_two(raw).map(|bytes| format!("{bytes} bytes")),
            Self::Decimal => Some(raw.to_string()),
            Self::YesNo => Some(if raw == 0 { "No" } else { "Yes" }.to_string()),
            Self::Support { label } => {
                let state = if raw == 0 {
                    "Not Supported"
                } else {
                    "Supported"
                };
                Some(format!("{label}: {state}"))
            }
            Self::State { set, clear } => Some(if raw == 0 { clear } else { set }.to_string()),
            Self::Selector { legend } => Some(format!("0x{raw:X} ({legend})")),
            Self::Lookup { labels } => usize::try_from(raw)
                .ok()
                .and_then(|index| labels.get(index))
                .map(|label| (*label).to_string()),
        }
    }
}

fn power_of_two(exponent: u64) -> Option<u64> {
    u32::try_from(exponent)
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
}

/// Converts a page-size exponent into bytes (`4096 * 2^exponent`).
#[must_use]
pub fn page_size_bytes(exponent: u64) -> Option<u64> {
    power_of_two(exponent).and_then(|factor| factor.checked_mul(BASE_PAGE_SIZE))
}

/// Static description of one register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Structured field identity.
    pub id: FieldId,
    /// Field mnemonic as displayed.
    pub name: &'static str,
    /// Bit range within the parent register.
    pub bits: BitRange,
    /// How the raw value is rendered.
    pub interpretation: Interpretation,
}

const fn field(
    id: FieldId,
    name: &'static str,
    bits: BitRange,
    interpretation: Interpretation,
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        bits,
        interpretation,
    }
}

/// Static description of one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterDescriptor {
    /// Structured register identity.
    pub id: RegisterId,
    /// Byte offset within the register block.
    pub offset: usize,
    /// Native width.
    pub width: RegisterWidth,
    /// Read/write policy.
    pub access: RegisterAccess,
    /// Long register name.
    pub description: &'static str,
    /// Field layout in ascending bit order; empty when the register has none.
    pub fields: &'static [FieldDescriptor],
}

impl RegisterDescriptor {
    /// Returns the register mnemonic.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        self.id.mnemonic()
    }

    /// Looks up a field descriptor by identity.
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|descriptor| descriptor.id == id)
    }
}

const CAP_FIELDS: &[FieldDescriptor] = &[
    field(
        FieldId::CapMqes,
        "MQES",
        BitRange::new(15, 0),
        Interpretation::EntryCount,
    ),
    field(
        FieldId::CapCqr,
        "CQR",
        BitRange::bit(16),
        Interpretation::YesNo,
    ),
    field(
        FieldId::CapAmsWrr,
        "AMS (WRR)",
        BitRange::bit(17),
        Interpretation::Support {
            label: "Weighted Round Robin",
        },
    ),
    field(
        FieldId::CapAmsVs,
        "AMS (VS)",
        BitRange::bit(18),
        Interpretation::Support {
            label: "Vendor Specific",
        },
    ),
    field(
        FieldId::CapReserved0,
        "Reserved0",
        BitRange::new(23, 19),
        Interpretation::Reserved,
    ),
    field(
        FieldId::CapTo,
        "TO",
        BitRange::new(31, 24),
        Interpretation::TimeoutMs,
    ),
    field(
        FieldId::CapDstrd,
        "DSTRD",
        BitRange::new(35, 32),
        Interpretation::DoorbellStride,
    ),
    field(
        FieldId::CapNssrs,
        "NSSRS",
        BitRange::bit(36),
        Interpretation::YesNo,
    ),
    field(
        FieldId::CapCssNvm,
        "CSS (NVM)",
        BitRange::bit(37),
        Interpretation::Support {
            label: "NVM Command Set",
        },
    ),
    field(
        FieldId::CapReserved1,
        "Reserved1",
        BitRange::new(44, 38),
        Interpretation::Reserved,
    ),
    field(
        FieldId::CapBps,
        "BPS",
        BitRange::bit(45),
        Interpretation::YesNo,
    ),
    field(
        FieldId::CapReserved2,
        "Reserved2",
        BitRange::new(47, 46),
        Interpretation::Reserved,
    ),
    field(
        FieldId::CapMpsmin,
        "MPSMIN",
        BitRange::new(51, 48),
        Interpretation::PageSize,
    ),
    field(
        FieldId::CapMpsmax,
        "MPSMAX",
        BitRange::new(55, 52),
        Interpretation::PageSize,
    ),
    field(
        FieldId::CapReserved3,
        "Reserved3",
        BitRange::new(63, 56),
        Interpretation::Reserved,
    ),
];

const VS_FIELDS: &[FieldDescriptor] = &[
    field(
        FieldId::VsTer,
        "TER",
        BitRange::new(7, 0),
        Interpretation::Decimal,
    ),
    field(
        FieldId::VsMnr,
        "MNR",
        BitRange::new(15, 8),
        Interpretation::Decimal,
    ),
    field(
        FieldId::VsMjr,
        "MJR",
        BitRange::new(31, 16),
        Interpretation::Decimal,
    ),
];

const CC_FIELDS: &[FieldDescriptor] = &[
    field(
        FieldId::CcEn,
        "EN",
        BitRange::bit(0),
        Interpretation::State {
            set: "Enabled",
            clear: "Disabled",
        },
    ),
    field(
        FieldId::CcReserved0,
        "Reserved0",
        BitRange::new(3, 1),
        Interpretation::Reserved,
    ),
    field(
        FieldId::CcCss,
        "CSS",
        BitRange::new(6, 4),
        Interpretation::Selector { legend: "0=NVM" },
    ),
    field(
        FieldId::CcMps,
        "MPS",
        BitRange::new(10, 7),
        Interpretation::PageSize,
    ),
    field(
        FieldId::CcAms,
        "AMS",
        BitRange::new(13, 11),
        Interpretation::Selector { legend: "0=WRR" },
    ),
    field(
        FieldId::CcShn,
        "SHN",
        BitRange::new(15, 14),
        Interpretation::Lookup {
            labels: &SHUTDOWN_NOTIFICATION_LABELS,
        },
    ),
    field(
        FieldId::CcIosqes,
        "IOSQES",
        BitRange::new(19, 16),
        Interpretation::EntrySize,
    ),
    field(
        FieldId::CcIocqes,
        "IOCQES",
        BitRange::new(23, 20),
        Interpretation::EntrySize,
    ),
    field(
        FieldId::CcReserved1,
        "Reserved1",
        BitRange::new(31, 24),
        Interpretation::Reserved,
    ),
];

const CSTS_FIELDS: &[FieldDescriptor] = &[
    field(
        FieldId::CstsRdy,
        "RDY",
        BitRange::bit(0),
        Interpretation::State {
            set: "Ready",
            clear: "Not ready",
        },
    ),
    field(
        FieldId::CstsCfs,
        "CFS",
        BitRange::bit(1),
        Interpretation::State {
            set: "Fatal error",
            clear: "No fatal error",
        },
    ),
    field(
        FieldId::CstsShst,
        "SHST",
        BitRange::new(3, 2),
        Interpretation::Lookup {
            labels: &SHUTDOWN_STATUS_LABELS,
        },
    ),
    field(
        FieldId::CstsNssro,
        "NSSRO",
        BitRange::bit(4),
        Interpretation::State {
            set: "Reset occurred",
            clear: "No reset",
        },
    ),
    field(
        FieldId::CstsPp,
        "PP",
        BitRange::bit(5),
        Interpretation::State {
            set: "Paused",
            clear: "Not paused",
        },
    ),
    field(
        FieldId::CstsReserved0,
        "Reserved0",
        BitRange::new(31, 6),
        Interpretation::Reserved,
    ),
];

const AQA_FIELDS: &[FieldDescriptor] = &[
    field(
        FieldId::AqaAsqs,
        "ASQS",
        BitRange::new(11, 0),
        Interpretation::EntryCount,
    ),
    field(
        FieldId::AqaReserved0,
        "Reserved0",
        BitRange::new(15, 12),
        Interpretation::Reserved,
    ),
    field(
        FieldId::AqaAcqs,
        "ACQS",
        BitRange::new(27, 16),
        Interpretation::EntryCount,
    ),
    field(
        FieldId::AqaReserved1,
        "Reserved1",
        BitRange::new(31, 28),
        Interpretation::Reserved,
    ),
];

const fn register(
    id: RegisterId,
    offset: usize,
    width: RegisterWidth,
    access: RegisterAccess,
    description: &'static str,
    fields: &'static [FieldDescriptor],
) -> RegisterDescriptor {
    RegisterDescriptor {
        id,
        offset,
        width,
        access,
        description,
        fields,
    }
}

const CAP_REGISTER: RegisterDescriptor = register(
    RegisterId::Cap,
    0x00,
    RegisterWidth::Qword,
    RegisterAccess::Readable,
    "Controller Capabilities",
    CAP_FIELDS,
);

const VS_REGISTER: RegisterDescriptor = register(
    RegisterId::Vs,
    0x08,
    RegisterWidth::Dword,
    RegisterAccess::Readable,
    "NVM Express Specification Version",
    VS_FIELDS,
);

const INTMS_REGISTER: RegisterDescriptor = register(
    RegisterId::Intms,
    0x0C,
    RegisterWidth::Dword,
    RegisterAccess::Readable,
    "Interrupt Mask Set",
    &[],
);

const INTMC_REGISTER: RegisterDescriptor = register(
    RegisterId::Intmc,
    0x10,
    RegisterWidth::Dword,
    RegisterAccess::Readable,
    "Interrupt Mask Clear",
    &[],
);

const CC_REGISTER: RegisterDescriptor = register(
    RegisterId::Cc,
    0x14,
    RegisterWidth::Dword,
    RegisterAccess::Readable,
    "Controller Configuration",
    CC_FIELDS,
);

const CSTS_REGISTER: RegisterDescriptor = register(
    RegisterId::Csts,
    0x1C,
    RegisterWidth::Dword,
    RegisterAccess::Readable,
    "Controller Status",
    CSTS_FIELDS,
);

const NSSR_REGISTER: RegisterDescriptor = register(
    RegisterId::Nssr,
    0x20,
    RegisterWidth::Dword,
    RegisterAccess::WriteOnly,
    "NVM Subsystem Reset (Write-Only)",
    &[],
);

const AQA_REGISTER: RegisterDescriptor = register(
    RegisterId::Aqa,
    0x24,
    RegisterWidth::Dword,
    RegisterAccess::Readable,
    "Admin Queue Attributes",
    AQA_FIELDS,
);

const ASQ_REGISTER: RegisterDescriptor = register(
    RegisterId::Asq,
    0x28,
    RegisterWidth::Qword,
    RegisterAccess::Readable,
    "Admin Submission Queue Base Address",
    &[],
);

const ACQ_REGISTER: RegisterDescriptor = register(
    RegisterId::Acq,
    0x30,
    RegisterWidth::Qword,
    RegisterAccess::Readable,
    "Admin Completion Queue Base Address",
    &[],
);

/// Canonical register layout of the controller register block, ascending by offset.
pub const REGISTER_SCHEMA: [RegisterDescriptor; 10] = [
    CAP_REGISTER,
    VS_REGISTER,
    INTMS_REGISTER,
    INTMC_REGISTER,
    CC_REGISTER,
    CSTS_REGISTER,
    NSSR_REGISTER,
    AQA_REGISTER,
    ASQ_REGISTER,
    ACQ_REGISTER,
];

const _: () = assert_register_schema_layout();

const fn assert_register_schema_layout() {
    let mut index = 0;
    while index < REGISTER_SCHEMA.len() {
        let descriptor = &REGISTER_SCHEMA[index];
        assert!(
            descriptor.offset + descriptor.width.bytes() <= BAR0_REGION_BYTES,
            "register must lie inside the register block"
        );

        if index > 0 {
            let previous = &REGISTER_SCHEMA[index - 1];
            assert!(
                previous.offset + previous.width.bytes() <= descriptor.offset,
                "registers must be ascending and non-overlapping"
            );
        }

        if !descriptor.fields.is_empty() {
            let mut next_bit: u8 = 0;
            let mut field_index = 0;
            while field_index < descriptor.fields.len() {
                let bits = descriptor.fields[field_index].bits;
                assert!(bits.high >= bits.low, "field range must be high:low");
                assert!(bits.low == next_bit, "fields must be contiguous");
                next_bit = bits.high + 1;
                field_index += 1;
            }
            assert!(
                next_bit == descriptor.width.bits(),
                "fields must cover the full register width"
            );
        }

        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        page_size_bytes, BitRange, FieldId, Interpretation, RegisterAccess, RegisterId,
        RegisterWidth, REGISTER_SCHEMA,
    };

    const RESERVED_FIELD_PREFIX: &str = "Reserved";

    #[test]
    fn descriptor_lookup_matches_schema_order() {
        for descriptor in &REGISTER_SCHEMA {
            assert_eq!(descriptor.id.descriptor(), descriptor);
        }
    }

    #[test]
    fn field_ranges_partition_register_width() {
        for descriptor in REGISTER_SCHEMA.iter().filter(|d| !d.fields.is_empty()) {
            let mut covered = 0u64;
            for field in descriptor.fields {
                let mask = field.bits.positioned_mask();
                assert_eq!(
                    covered & mask,
                    0,
                    "{}.{} overlaps an earlier field",
                    descriptor.mnemonic(),
                    field.name
                );
                covered |= mask;
            }
            let full = match descriptor.width {
                RegisterWidth::Dword => u64::from(u32::MAX),
                RegisterWidth::Qword => u64::MAX,
            };
            let name = descriptor.mnemonic();
            assert_eq!(covered, full, "{name} has uncovered bits");
        }
    }

    #[test]
    fn reserved_markers_agree_between_name_and_identity() {
        for descriptor in &REGISTER_SCHEMA {
            for field in descriptor.fields {
                assert_eq!(
                    field.name.starts_with(RESERVED_FIELD_PREFIX),
                    field.id.is_reserved(),
                    "{}.{}",
                    descriptor.mnemonic(),
                    field.name
                );
                assert_eq!(
                    field.interpretation == Interpretation::Reserved,
                    field.id.is_reserved()
                );
            }
        }
    }

    #[test]
    fn field_names_are_unique_per_register() {
        for descriptor in &REGISTER_SCHEMA {
            for (index, field) in descriptor.fields.iter().enumerate() {
                assert!(descriptor.fields[index + 1..]
                    .iter()
                    .all(|other| other.name != field.name));
            }
        }
    }

    #[test]
    fn only_nssr_is_write_only() {
        for descriptor in &REGISTER_SCHEMA {
            assert_eq!(
                descriptor.access == RegisterAccess::WriteOnly,
                descriptor.id == RegisterId::Nssr
            );
        }
    }

    #[test]
    fn bit_range_display_uses_single_index_for_one_bit() {
        assert_eq!(BitRange::new(15, 0).to_string(), "15:0");
        assert_eq!(BitRange::bit(16).to_string(), "16");
    }

    #[test]
    fn bit_range_extracts_high_qword_fields() {
        let range = BitRange::new(63, 56);
        assert_eq!(range.extract_u64(0xAB00_0000_0000_0000), 0xAB);
        assert_eq!(BitRange::new(63, 0).mask(), u64::MAX);
        assert_eq!(BitRange::new(31, 6).extract_u32(u32::MAX), 0x03FF_FFFF);
    }

    #[test]
    fn unit_conversions_match_register_conventions() {
        assert_eq!(
            Interpretation::EntryCount.describe(0x1F).as_deref(),
            Some("32 entries")
        );
        assert_eq!(
            Interpretation::TimeoutMs.describe(0x3C).as_deref(),
            Some("30000 ms")
        );
        assert_eq!(
            Interpretation::DoorbellStride.describe(0).as_deref(),
            Some("4 bytes")
        );
        assert_eq!(
            Interpretation::PageSize.describe(1).as_deref(),
            Some("8192 B")
        );
        assert_eq!(
            Interpretation::EntrySize.describe(6).as_deref(),
            Some("64 bytes")
        );
        assert_eq!(Interpretation::Reserved.describe(5), None);
        assert_eq!(page_size_bytes(0), Some(4096));
        assert_eq!(page_size_bytes(64), None);
    }

    #[test]
    fn enumerated_codes_map_to_labels() {
        let shn = RegisterId::Cc
            .descriptor()
            .field(FieldId::CcShn)
            .expect("CC.SHN in schema");
        assert_eq!(
            shn.interpretation.describe(2).as_deref(),
            Some("Abrupt shutdown")
        );
        assert_eq!(shn.interpretation.describe(3).as_deref(), Some("Reserved"));

        let css = RegisterId::Cc
            .descriptor()
            .field(FieldId::CcCss)
            .expect("CC.CSS in schema");
        assert_eq!(
            css.interpretation.describe(0).as_deref(),
            Some("0x0 (0=NVM)")
        );
    }
}
