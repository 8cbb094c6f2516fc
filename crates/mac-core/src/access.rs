//! Register-access transport model: widths, operations, and step outputs.

use thiserror::Error;

/// Access width for a single register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AccessWidth {
    /// 8-bit access over the low byte.
    Bits8,
    /// 16-bit access over the low halfword.
    Bits16,
    /// Full 32-bit access.
    Bits32,
}

impl AccessWidth {
    /// Returns the low-bit mask selecting the participating data bits.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Bits8 => 0xFF,
            Self::Bits16 => 0xFFFF,
            Self::Bits32 => u32::MAX,
        }
    }

    /// Returns the access width in bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits32 => 32,
        }
    }

    /// Decodes a raw transport width-in-bits value.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDecodeError::UnsupportedWidth`] when `bits` is not one
    /// of 8, 16, or 32.
    pub const fn try_from_bits(bits: u8) -> Result<Self, AccessDecodeError> {
        match bits {
            8 => Ok(Self::Bits8),
            16 => Ok(Self::Bits16),
            32 => Ok(Self::Bits32),
            _ => Err(AccessDecodeError::UnsupportedWidth(bits)),
        }
    }
}

/// Transport-boundary decode failures for raw access payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AccessDecodeError {
    /// Transport presented a width other than 8, 16, or 32 bits.
    #[error("unsupported access width: {0} bits")]
    UnsupportedWidth(u8),
}

/// One register access presented to the engine for a single step.
///
/// Exactly one access (or none) is applied per step; the engine advances one
/// clock cycle either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RegisterAccess {
    /// No access this cycle.
    Idle,
    /// Read of the addressed register, truncated to the access width.
    Read {
        /// 6-bit register address selector.
        addr: u8,
        /// Access width selecting the significant result bits.
        width: AccessWidth,
    },
    /// Masked partial write of the addressed register.
    Write {
        /// 6-bit register address selector.
        addr: u8,
        /// 32-bit write payload; only masked bits participate.
        data: u32,
        /// Access width selecting the participating payload bits.
        width: AccessWidth,
    },
}

/// Combinational outputs produced by one engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepOutput {
    /// Read result for this step; zero for writes and idle steps.
    pub data_out: u32,
    /// Always asserted: every access completes in the cycle it is issued.
    pub ready: bool,
    /// Level interrupt output (`DONE || SAT`) after this step.
    pub interrupt: bool,
}

#[cfg(test)]
mod tests {
    use super::{AccessDecodeError, AccessWidth};

    #[test]
    fn width_masks_select_the_low_participating_bits() {
        assert_eq!(AccessWidth::Bits8.mask(), 0x0000_00FF);
        assert_eq!(AccessWidth::Bits16.mask(), 0x0000_FFFF);
        assert_eq!(AccessWidth::Bits32.mask(), 0xFFFF_FFFF);
    }

    #[test]
    fn width_decode_accepts_only_supported_widths() {
        assert_eq!(AccessWidth::try_from_bits(8), Ok(AccessWidth::Bits8));
        assert_eq!(AccessWidth::try_from_bits(16), Ok(AccessWidth::Bits16));
        assert_eq!(AccessWidth::try_from_bits(32), Ok(AccessWidth::Bits32));

        assert_eq!(
            AccessWidth::try_from_bits(0),
            Err(AccessDecodeError::UnsupportedWidth(0))
        );
        assert_eq!(
            AccessWidth::try_from_bits(24),
            Err(AccessDecodeError::UnsupportedWidth(24))
        );
        assert_eq!(
            AccessWidth::try_from_bits(64),
            Err(AccessDecodeError::UnsupportedWidth(64))
        );
    }

    #[test]
    fn width_bits_roundtrip_through_decode() {
        for width in [AccessWidth::Bits8, AccessWidth::Bits16, AccessWidth::Bits32] {
            assert_eq!(AccessWidth::try_from_bits(width.bits()), Ok(width));
        }
    }
}
