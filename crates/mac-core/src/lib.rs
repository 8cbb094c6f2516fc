//! Register-mapped INT16 multiply-accumulate engine core.
//!
//! Cycle-stepped model of a deterministic fixed-point MAC peripheral: a
//! 16x16 signed/unsigned multiply, an optional shift with
//! round-half-away-from-zero, a saturating 48-bit accumulator, and a
//! status overlay plus level interrupt on the control register. The engine
//! consumes one register access (address, data, width, operation) per step
//! from an external transport and produces a data-out value, an
//! always-ready signal, and the interrupt level.

/// Fixed register address map, control fields, and status overlay.
pub mod regs;
pub use regs::{
    ControlFields, RegisterAddr, StatusFlags, ACC_HI_ADDR, ACC_LO_ADDR, ACC_MID_ADDR,
    CONTROL_ADDR, CTRL_CLEAR_ACC, CTRL_CLEAR_DONE, CTRL_MODE_MAC, CTRL_PULSE_MASK, CTRL_ROUND_EN,
    CTRL_SATURATE_EN, CTRL_SHIFT_MASK, CTRL_SHIFT_OFFSET, CTRL_SIGNED, CTRL_START,
    OPERAND_A_ADDR, OPERAND_B_ADDR, PRODUCT_ADDR, STATUS_BUSY, STATUS_DONE, STATUS_OVERLAY_MASK,
    STATUS_SAT,
};

/// Register-access transport model consumed by the engine.
pub mod access;
pub use access::{AccessDecodeError, AccessWidth, RegisterAccess, StepOutput};

/// Combinational arithmetic pipeline.
pub mod pipeline;
pub use pipeline::{evaluate_pipeline, PipelineResult, ACC_MAX, ACC_MIN};

/// Engine state and the start/busy/done commit machine.
pub mod engine;
pub use engine::MacEngine;

/// Deterministic trace events and sink trait.
pub mod trace;
pub use trace::{TraceEvent, TraceSink};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
