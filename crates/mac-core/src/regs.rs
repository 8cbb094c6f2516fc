//! Fixed register address map, control-word fields, and status overlay.

/// Address of the CONTROL register (read/write, status overlay on read).
pub const CONTROL_ADDR: u8 = 0x20;
/// Address of the OPERAND_A register (read/write, low 16 bits significant).
pub const OPERAND_A_ADDR: u8 = 0x24;
/// Address of the OPERAND_B register (read/write, low 16 bits significant).
pub const OPERAND_B_ADDR: u8 = 0x28;
/// Address of the PRODUCT register (read-only, full 32 bits).
pub const PRODUCT_ADDR: u8 = 0x2C;
/// Address of the ACC_HI register (read-only, accumulator bits 47:32).
pub const ACC_HI_ADDR: u8 = 0x30;
/// Address of the ACC_MID register (read-only, accumulator bits 31:16).
pub const ACC_MID_ADDR: u8 = 0x34;
/// Address of the ACC_LO register (read-only, accumulator bits 15:0).
pub const ACC_LO_ADDR: u8 = 0x38;

/// CONTROL pulse bit: request one commit of the current operands.
pub const CTRL_START: u32 = 1 << 0;
/// CONTROL bit: operating mode (`0` = MUL, `1` = MAC).
pub const CTRL_MODE_MAC: u32 = 1 << 1;
/// CONTROL bit: interpret operands as signed two's-complement.
pub const CTRL_SIGNED: u32 = 1 << 2;
/// CONTROL bit: clamp the accumulator to the 48-bit signed range on commit.
pub const CTRL_SATURATE_EN: u32 = 1 << 3;
/// CONTROL bit: round half away from zero before the right shift.
pub const CTRL_ROUND_EN: u32 = 1 << 4;
/// Bit offset of the 6-bit SHIFT field within CONTROL.
pub const CTRL_SHIFT_OFFSET: u32 = 5;
/// Mask of the 6-bit SHIFT field within CONTROL (bits 5..=10).
pub const CTRL_SHIFT_MASK: u32 = 0x3F << CTRL_SHIFT_OFFSET;
/// CONTROL pulse bit: zero the accumulator and clear SAT, set DONE.
pub const CTRL_CLEAR_ACC: u32 = 1 << 11;
/// CONTROL pulse bit: clear the sticky DONE flag.
pub const CTRL_CLEAR_DONE: u32 = 1 << 12;
/// Pulse bits are write triggers and are never stored in the control word.
pub const CTRL_PULSE_MASK: u32 = CTRL_START | CTRL_CLEAR_ACC | CTRL_CLEAR_DONE;

/// Read-overlay bit reporting BUSY on CONTROL reads.
pub const STATUS_BUSY: u32 = 1 << 16;
/// Read-overlay bit reporting the sticky DONE flag on CONTROL reads.
pub const STATUS_DONE: u32 = 1 << 17;
/// Read-overlay bit reporting SAT on CONTROL reads.
pub const STATUS_SAT: u32 = 1 << 18;
/// Mask of the CONTROL bit positions replaced by live status on reads.
pub const STATUS_OVERLAY_MASK: u32 = STATUS_BUSY | STATUS_DONE | STATUS_SAT;

/// Architecturally mapped register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RegisterAddr {
    /// CONTROL register (`0x20`).
    Control,
    /// OPERAND_A register (`0x24`).
    OperandA,
    /// OPERAND_B register (`0x28`).
    OperandB,
    /// PRODUCT register (`0x2C`).
    Product,
    /// ACC_HI register (`0x30`).
    AccHi,
    /// ACC_MID register (`0x34`).
    AccMid,
    /// ACC_LO register (`0x38`).
    AccLo,
}

impl RegisterAddr {
    /// Ordered list of all mapped registers in ascending address order.
    pub const ALL: [Self; 7] = [
        Self::Control,
        Self::OperandA,
        Self::OperandB,
        Self::Product,
        Self::AccHi,
        Self::AccMid,
        Self::AccLo,
    ];

    /// Returns the 6-bit address selector for this register.
    #[must_use]
    pub const fn addr(self) -> u8 {
        match self {
            Self::Control => CONTROL_ADDR,
            Self::OperandA => OPERAND_A_ADDR,
            Self::OperandB => OPERAND_B_ADDR,
            Self::Product => PRODUCT_ADDR,
            Self::AccHi => ACC_HI_ADDR,
            Self::AccMid => ACC_MID_ADDR,
            Self::AccLo => ACC_LO_ADDR,
        }
    }

    /// Decodes a 6-bit address selector into a mapped register.
    #[must_use]
    pub const fn from_addr(addr: u8) -> Option<Self> {
        match addr {
            CONTROL_ADDR => Some(Self::Control),
            OPERAND_A_ADDR => Some(Self::OperandA),
            OPERAND_B_ADDR => Some(Self::OperandB),
            PRODUCT_ADDR => Some(Self::Product),
            ACC_HI_ADDR => Some(Self::AccHi),
            ACC_MID_ADDR => Some(Self::AccMid),
            ACC_LO_ADDR => Some(Self::AccLo),
            _ => None,
        }
    }

    /// Returns `true` when writes to this register have architectural effect.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Control | Self::OperandA | Self::OperandB)
    }
}

/// Decoded persisted CONTROL fields consumed by the arithmetic pipeline.
#[allow(clippy::struct_excessive_bools)] // mirrors the hardware control bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ControlFields {
    /// Operating mode (`false` = MUL, `true` = MAC). Not consulted by the
    /// commit path; the accumulator updates on every commit.
    pub mac_mode: bool,
    /// Signed two's-complement operand interpretation.
    pub signed: bool,
    /// Saturating accumulation enable.
    pub saturate: bool,
    /// Round-half-away-from-zero enable for the shift stage.
    pub round: bool,
    /// Arithmetic right-shift amount applied to the product (0..=63).
    pub shift: u32,
}

impl ControlFields {
    /// Decodes the persisted fields from a stored control word.
    #[must_use]
    pub const fn from_word(word: u32) -> Self {
        Self {
            mac_mode: word & CTRL_MODE_MAC != 0,
            signed: word & CTRL_SIGNED != 0,
            saturate: word & CTRL_SATURATE_EN != 0,
            round: word & CTRL_ROUND_EN != 0,
            shift: (word & CTRL_SHIFT_MASK) >> CTRL_SHIFT_OFFSET,
        }
    }
}

/// Live engine status flags, stored separately from the writable control word
/// and merged into bits 16..=18 only at the read boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct StatusFlags {
    /// True for exactly one step between an accepted START and its commit.
    pub busy: bool,
    /// Sticky completion flag; cleared only by an explicit CLEAR_DONE.
    pub done: bool,
    /// True when the most recent commit clamped the accumulator.
    pub sat: bool,
}

impl StatusFlags {
    /// Returns the read-overlay bits for a CONTROL read.
    #[must_use]
    pub const fn overlay_bits(self) -> u32 {
        let mut bits = 0;
        if self.busy {
            bits |= STATUS_BUSY;
        }
        if self.done {
            bits |= STATUS_DONE;
        }
        if self.sat {
            bits |= STATUS_SAT;
        }
        bits
    }

    /// Level interrupt output: asserted while DONE or SAT is set.
    #[must_use]
    pub const fn interrupt(self) -> bool {
        self.done || self.sat
    }
}
