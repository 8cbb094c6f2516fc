//! Deterministic trace events emitted at step boundaries when a sink is
//! attached.

use crate::access::AccessWidth;

/// Deterministic trace events emitted by the engine in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// A masked register write was applied.
    RegisterWrite {
        /// 6-bit register address selector.
        addr: u8,
        /// Stored register value after the masked merge.
        value: u32,
        /// Access width used for the write.
        width: AccessWidth,
    },
    /// A register read returned `value`.
    RegisterRead {
        /// 6-bit register address selector.
        addr: u8,
        /// Width-truncated read result.
        value: u32,
        /// Access width used for the read.
        width: AccessWidth,
    },
    /// A START request was accepted and latched.
    StartAccepted,
    /// A START request arrived while BUSY and was dropped.
    StartDropped,
    /// CLEAR_DONE cleared the sticky DONE flag.
    DoneCleared,
    /// CLEAR_ACC zeroed the accumulator and cleared SAT.
    AccumulatorCleared,
    /// A pending start committed product and accumulator state.
    Commit {
        /// Committed 32-bit product.
        product: u32,
        /// Committed 48-bit accumulator value.
        accumulator: i64,
        /// True when this commit clamped the accumulator.
        saturated: bool,
    },
}

/// Sink trait for deterministic trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
