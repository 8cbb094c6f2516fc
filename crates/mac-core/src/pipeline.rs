//! Combinational arithmetic pipeline: multiply, shift/round, and the
//! accumulate candidate with saturation policy.
//!
//! The pipeline is a pure function of the current register state. It has no
//! persistent state of its own and is re-evaluated on demand; only the commit
//! step writes its result back into the register file.

use crate::regs::ControlFields;

/// Inclusive maximum of the 48-bit signed accumulator range (`2^47 - 1`).
pub const ACC_MAX: i64 = (1 << 47) - 1;
/// Inclusive minimum of the 48-bit signed accumulator range (`-2^47`).
pub const ACC_MIN: i64 = -(1 << 47);

/// Result of one combinational pipeline evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineResult {
    /// Low 32 bits of the selected (signed or unsigned) product.
    pub product: u32,
    /// Product after optional rounding and arithmetic right shift.
    pub shifted: i64,
    /// Accumulator value a commit would store (clamped or wrapped to 48 bits).
    pub accumulator: i64,
    /// True when saturation clamping changed the candidate value.
    pub saturated: bool,
}

/// Evaluates the pipeline from the current register state.
///
/// Only the low 16 bits of each operand participate. The selected product is
/// reinterpreted as a 32-bit signed quantity for the shift and accumulate
/// stages regardless of the SIGNED selection.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub const fn evaluate_pipeline(
    ctrl: ControlFields,
    operand_a: u32,
    operand_b: u32,
    accumulator: i64,
) -> PipelineResult {
    let a = operand_a as u16;
    let b = operand_b as u16;

    let selected: i32 = if ctrl.signed {
        (a as i16 as i32) * (b as i16 as i32)
    } else {
        ((a as u32) * (b as u32)) as i32
    };

    let shifted = shift_round(selected as i64, ctrl.shift, ctrl.round);
    let candidate = accumulator + shifted;

    let (committed, saturated) = if ctrl.saturate {
        clamp48(candidate)
    } else {
        (wrap48(candidate), false)
    };

    PipelineResult {
        product: selected as u32,
        shifted,
        accumulator: committed,
        saturated,
    }
}

/// Applies the optional round-half-away-from-zero bias and the arithmetic
/// right shift. Evaluated in 64 bits so shift amounts up to 63 are defined.
const fn shift_round(value: i64, shift: u32, round: bool) -> i64 {
    if shift == 0 {
        return value;
    }
    let biased = if round {
        let r = 1_i64 << (shift - 1);
        if value >= 0 {
            value + r
        } else {
            value - r
        }
    } else {
        value
    };
    biased >> shift
}

/// Clamps a candidate to the 48-bit signed range, reporting whether the
/// clamp changed the value.
const fn clamp48(candidate: i64) -> (i64, bool) {
    if candidate > ACC_MAX {
        (ACC_MAX, true)
    } else if candidate < ACC_MIN {
        (ACC_MIN, true)
    } else {
        (candidate, false)
    }
}

/// Wraps a candidate into the 48-bit signed range (two's-complement).
const fn wrap48(candidate: i64) -> i64 {
    (candidate << 16) >> 16
}

#[cfg(test)]
mod tests {
    use super::{evaluate_pipeline, PipelineResult, ACC_MAX, ACC_MIN};
    use crate::regs::ControlFields;

    const fn ctrl(signed: bool, saturate: bool, round: bool, shift: u32) -> ControlFields {
        ControlFields {
            mac_mode: true,
            signed,
            saturate,
            round,
            shift,
        }
    }

    const fn eval(fields: ControlFields, a: u32, b: u32, acc: i64) -> PipelineResult {
        evaluate_pipeline(fields, a, b, acc)
    }

    #[test]
    fn signed_product_uses_twos_complement_multiplication() {
        let result = eval(ctrl(true, false, false, 0), 0xFFFE, 100, 0);
        assert_eq!(result.product, 0xFFFF_FF38);
        assert_eq!(result.shifted, -200);
        assert_eq!(result.accumulator, -200);
    }

    #[test]
    fn signed_product_handles_both_extremes() {
        let result = eval(ctrl(true, false, false, 0), 0x8000, 0x8000, 0);
        assert_eq!(result.product, 0x4000_0000);
        assert_eq!(result.shifted, 1 << 30);

        let result = eval(ctrl(true, false, false, 0), 0x8000, 0x7FFF, 0);
        assert_eq!(result.shifted, -(32768 * 32767));
    }

    #[test]
    fn unsigned_product_has_no_sign_extension() {
        let result = eval(ctrl(false, false, false, 0), 0xFFFF, 0xFFFF, 0);
        assert_eq!(result.product, 0xFFFE_0001);

        let result = eval(ctrl(false, false, false, 0), 0xFFFE, 100, 0);
        assert_eq!(result.product, 0x0063_FF38);
    }

    #[test]
    fn unsigned_product_is_reinterpreted_as_signed_downstream() {
        // 0xFFFE_0001 carries bit 31, so the accumulate stage sees a
        // negative 32-bit quantity.
        let result = eval(ctrl(false, false, false, 0), 0xFFFF, 0xFFFF, 0);
        assert_eq!(result.accumulator, i64::from(0xFFFE_0001_u32 as i32));
        assert!(result.accumulator < 0);
    }

    #[test]
    fn only_low_16_operand_bits_participate() {
        let result = eval(ctrl(false, false, false, 0), 0xABCD_0003, 0x1234_0005, 0);
        assert_eq!(result.product, 15);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 5 + 1 = 6 >> 1 = 3
        let result = eval(ctrl(true, false, true, 1), 5, 1, 0);
        assert_eq!(result.shifted, 3);

        // -5 - 1 = -6 >> 1 = -3
        let result = eval(ctrl(true, false, true, 1), 0xFFFB, 1, 0);
        assert_eq!(result.shifted, -3);
    }

    #[test]
    fn unrounded_shift_is_plain_arithmetic_shift() {
        let result = eval(ctrl(true, false, false, 1), 5, 1, 0);
        assert_eq!(result.shifted, 2);

        let result = eval(ctrl(true, false, false, 1), 0xFFFB, 1, 0);
        assert_eq!(result.shifted, -3);
    }

    #[test]
    fn shift_of_zero_passes_the_product_through() {
        let result = eval(ctrl(true, false, true, 0), 5, 1, 0);
        assert_eq!(result.shifted, 5);
    }

    #[test]
    fn maximum_shift_drains_to_sign() {
        let result = eval(ctrl(true, false, false, 63), 0x7FFF, 0x7FFF, 0);
        assert_eq!(result.shifted, 0);

        let result = eval(ctrl(true, false, false, 63), 0x8000, 0x7FFF, 0);
        assert_eq!(result.shifted, -1);
    }

    #[test]
    fn saturation_clamps_to_the_48_bit_bounds() {
        let result = eval(ctrl(true, true, false, 0), 0x7FFF, 0x7FFF, ACC_MAX - 1);
        assert_eq!(result.accumulator, ACC_MAX);
        assert!(result.saturated);

        let result = eval(ctrl(true, true, false, 0), 0x8000, 0x7FFF, ACC_MIN + 1);
        assert_eq!(result.accumulator, ACC_MIN);
        assert!(result.saturated);
    }

    #[test]
    fn saturation_boundary_values_are_inclusive() {
        let result = eval(ctrl(true, true, false, 0), 1, 1, ACC_MAX - 1);
        assert_eq!(result.accumulator, ACC_MAX);
        assert!(!result.saturated);

        let result = eval(ctrl(true, true, false, 0), 0xFFFF, 1, ACC_MIN + 1);
        assert_eq!(result.accumulator, ACC_MIN);
        assert!(!result.saturated);
    }

    #[test]
    fn overflow_without_saturation_wraps_as_48_bit_twos_complement() {
        let result = eval(ctrl(true, false, false, 0), 1, 1, ACC_MAX);
        assert_eq!(result.accumulator, ACC_MIN);
        assert!(!result.saturated);

        let result = eval(ctrl(true, false, false, 0), 0xFFFF, 1, ACC_MIN);
        assert_eq!(result.accumulator, ACC_MAX);
        assert!(!result.saturated);
    }
}
