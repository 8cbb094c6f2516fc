//! Engine state, access decode, and the start/busy/done commit machine.

use crate::access::{AccessWidth, RegisterAccess, StepOutput};
use crate::pipeline::evaluate_pipeline;
use crate::regs::{
    ControlFields, RegisterAddr, StatusFlags, CTRL_CLEAR_ACC, CTRL_CLEAR_DONE, CTRL_PULSE_MASK,
    CTRL_START, STATUS_OVERLAY_MASK,
};
use crate::trace::{TraceEvent, TraceSink};

/// Register-mapped INT16 multiply-accumulate engine.
///
/// One instance is the complete register file plus commit state machine. The
/// engine is driven in lock-step by an external caller: each [`Self::step`]
/// models one clock cycle carrying at most one register access. A START
/// accepted in cycle N commits its result at the end of cycle N+1, so a read
/// issued in cycle N+1 observes `BUSY = 1` and pre-commit values.
///
/// There are no recoverable errors: writes to read-only or unmapped
/// addresses are silently ignored, START while BUSY is silently dropped, and
/// non-saturating accumulator overflow wraps as 48-bit two's complement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MacEngine {
    control: u32,
    operand_a: u32,
    operand_b: u32,
    product: u32,
    accumulator: i64,
    status: StatusFlags,
    start_latch: bool,
}

struct NullSink;

impl TraceSink for NullSink {
    fn on_event(&mut self, _event: TraceEvent) {}
}

impl MacEngine {
    /// Creates an engine in the reset state (all registers zero).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the reset state: all registers zero, no pending start, and
    /// the interrupt line deasserted.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the stored control word (persisted bits only, no overlay).
    #[must_use]
    pub const fn control_word(&self) -> u32 {
        self.control
    }

    /// Returns the stored OPERAND_A value, inert upper bits included.
    #[must_use]
    pub const fn operand_a(&self) -> u32 {
        self.operand_a
    }

    /// Returns the stored OPERAND_B value, inert upper bits included.
    #[must_use]
    pub const fn operand_b(&self) -> u32 {
        self.operand_b
    }

    /// Returns the low 32 bits of the last committed product.
    #[must_use]
    pub const fn product(&self) -> u32 {
        self.product
    }

    /// Returns the 48-bit signed accumulator value.
    #[must_use]
    pub const fn accumulator(&self) -> i64 {
        self.accumulator
    }

    /// Returns the live status flags.
    #[must_use]
    pub const fn status(&self) -> StatusFlags {
        self.status
    }

    /// Level interrupt output: asserted while DONE or SAT is set.
    #[must_use]
    pub const fn interrupt(&self) -> bool {
        self.status.interrupt()
    }

    /// Returns `true` while an accepted START is pending commit.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.status.busy
    }

    /// Advances one clock cycle, applying at most one register access.
    ///
    /// A start latched by a previous step commits at the end of this step,
    /// after the access has been applied, so this step's access still
    /// observes the pre-commit state.
    pub fn step(&mut self, access: RegisterAccess) -> StepOutput {
        self.step_with_trace(access, &mut NullSink)
    }

    /// [`Self::step`] with deterministic trace-event dispatch.
    pub fn step_with_trace(
        &mut self,
        access: RegisterAccess,
        sink: &mut dyn TraceSink,
    ) -> StepOutput {
        let commit_pending = self.start_latch;

        let data_out = match access {
            RegisterAccess::Idle => 0,
            RegisterAccess::Read { addr, width } => {
                let value = self.read_register(addr) & width.mask();
                sink.on_event(TraceEvent::RegisterRead { addr, value, width });
                value
            }
            RegisterAccess::Write { addr, data, width } => {
                self.write_register(addr, data, width, sink);
                0
            }
        };

        if commit_pending {
            self.commit(sink);
        }

        StepOutput {
            data_out,
            ready: true,
            interrupt: self.status.interrupt(),
        }
    }

    /// Convenience full-width write driving one step.
    pub fn write_reg(&mut self, addr: u8, data: u32) -> StepOutput {
        self.step(RegisterAccess::Write {
            addr,
            data,
            width: AccessWidth::Bits32,
        })
    }

    /// Convenience full-width read driving one step.
    pub fn read_reg(&mut self, addr: u8) -> u32 {
        self.step(RegisterAccess::Read {
            addr,
            width: AccessWidth::Bits32,
        })
        .data_out
    }

    /// Advances one clock cycle with no register access.
    pub fn idle_step(&mut self) -> StepOutput {
        self.step(RegisterAccess::Idle)
    }

    /// Reads the addressed register with the CONTROL status overlay applied.
    /// Unmapped addresses read as zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn read_register(&self, addr: u8) -> u32 {
        let Some(reg) = RegisterAddr::from_addr(addr) else {
            return 0;
        };
        match reg {
            RegisterAddr::Control => {
                (self.control & !STATUS_OVERLAY_MASK) | self.status.overlay_bits()
            }
            RegisterAddr::OperandA => self.operand_a,
            RegisterAddr::OperandB => self.operand_b,
            RegisterAddr::Product => self.product,
            RegisterAddr::AccHi => ((self.accumulator as u64 >> 32) & 0xFFFF) as u32,
            RegisterAddr::AccMid => ((self.accumulator as u64 >> 16) & 0xFFFF) as u32,
            RegisterAddr::AccLo => (self.accumulator as u64 & 0xFFFF) as u32,
        }
    }

    /// Applies a masked partial write. Writes to read-only or unmapped
    /// addresses are silently ignored.
    fn write_register(
        &mut self,
        addr: u8,
        data: u32,
        width: AccessWidth,
        sink: &mut dyn TraceSink,
    ) {
        let mask = width.mask();
        match RegisterAddr::from_addr(addr) {
            Some(RegisterAddr::Control) => {
                let merged = (self.control & !mask) | (data & mask);
                self.control = merged & !CTRL_PULSE_MASK;
                sink.on_event(TraceEvent::RegisterWrite {
                    addr,
                    value: self.control,
                    width,
                });
                self.apply_control_pulses(data, sink);
            }
            Some(RegisterAddr::OperandA) => {
                self.operand_a = (self.operand_a & !mask) | (data & mask);
                sink.on_event(TraceEvent::RegisterWrite {
                    addr,
                    value: self.operand_a,
                    width,
                });
            }
            Some(RegisterAddr::OperandB) => {
                self.operand_b = (self.operand_b & !mask) | (data & mask);
                sink.on_event(TraceEvent::RegisterWrite {
                    addr,
                    value: self.operand_b,
                    width,
                });
            }
            // PRODUCT and the accumulator windows are read-only.
            Some(
                RegisterAddr::Product
                | RegisterAddr::AccHi
                | RegisterAddr::AccMid
                | RegisterAddr::AccLo,
            )
            | None => {}
        }
    }

    /// Evaluates the pulse bits of the raw incoming write data.
    ///
    /// Ordered rule: CLEAR_DONE first, then START acceptance, then CLEAR_ACC
    /// last, so CLEAR_ACC's `DONE = 1` is the final DONE writer in this step.
    fn apply_control_pulses(&mut self, data: u32, sink: &mut dyn TraceSink) {
        if data & CTRL_CLEAR_DONE != 0 {
            self.status.done = false;
            sink.on_event(TraceEvent::DoneCleared);
        }
        if data & CTRL_START != 0 {
            if self.status.busy {
                // Dropped: no queueing of start requests.
                sink.on_event(TraceEvent::StartDropped);
            } else {
                self.start_latch = true;
                self.status.busy = true;
                self.status.done = false;
                sink.on_event(TraceEvent::StartAccepted);
            }
        }
        if data & CTRL_CLEAR_ACC != 0 {
            self.accumulator = 0;
            self.status.sat = false;
            self.status.done = true;
            sink.on_event(TraceEvent::AccumulatorCleared);
        }
    }

    /// Atomically commits the pipeline result for the latched start.
    ///
    /// MODE is intentionally not consulted here: the accumulator updates on
    /// every commit, in MUL mode as well as MAC mode.
    fn commit(&mut self, sink: &mut dyn TraceSink) {
        let result = evaluate_pipeline(
            ControlFields::from_word(self.control),
            self.operand_a,
            self.operand_b,
            self.accumulator,
        );

        self.product = result.product;
        self.accumulator = result.accumulator;
        self.status.sat = result.saturated;
        self.status.done = true;
        self.status.busy = false;
        self.start_latch = false;

        sink.on_event(TraceEvent::Commit {
            product: result.product,
            accumulator: result.accumulator,
            saturated: result.saturated,
        });
    }
}
