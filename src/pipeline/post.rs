use serde::{Deserialize, Serialize};

use crate::fixed::{clamp, rounding_divide_by_pot, split_shift};
use crate::pipeline::sequencer::DelayLine;
use crate::pipeline::srdhm::{Srdhm, SrdhmRegs};

/// Values presented to the pipeline for one accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequantInput {
    pub accumulator: i32,
    pub bias: i32,
    pub multiplier: i32,
    /// Positive shifts left before the multiply, negative shifts right after it.
    pub shift: i32,
}

/// Run-wide configuration, read when the result leaves the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputStage {
    pub offset: i32,
    pub activation_min: i32,
    pub activation_max: i32,
}

impl Default for OutputStage {
    fn default() -> Self { Self { offset: 0, activation_min: i32::MIN, activation_max: i32::MAX } }
}

impl OutputStage {
    /// Signed 8-bit output range.
    pub fn int8(offset: i32) -> Self { Self { offset, activation_min: -128, activation_max: 127 } }

    /// Offset, then clamp.
    pub fn apply(&self, value: i32) -> i32 {
        clamp(value.wrapping_add(self.offset), self.activation_min, self.activation_max)
    }
}

/// Input stage: bias added, shift split, left shift applied, all registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct InputRegs {
    shifted: i32,
    multiplier: i32,
    right_shift: u32,
}

impl InputRegs {
    fn sample(input: &RequantInput) -> Self {
        let with_bias = input.accumulator.wrapping_add(input.bias);
        let (left_shift, right_shift) = split_shift(input.shift);
        Self { shifted: with_bias.wrapping_shl(left_shift), multiplier: input.multiplier, right_shift }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PipelineRegs {
    input: InputRegs,
    srdhm: SrdhmRegs,
    // right shift rides alongside the multiply
    right_shift: DelayLine<u32, { Srdhm::LATENCY }>,
}

impl PipelineRegs {
    fn next(&self, input: &RequantInput) -> Self {
        Self {
            input: InputRegs::sample(input),
            srdhm: self.srdhm.next(self.input.shifted, self.input.multiplier),
            right_shift: self.right_shift.next(self.input.right_shift),
        }
    }

    fn output(&self, stage: &OutputStage) -> i32 {
        let shifted = rounding_divide_by_pot(self.srdhm.result(), self.right_shift.output());
        stage.apply(shifted)
    }
}

/// Four-tick requantization pipeline:
///
/// ```text
/// acc = accumulator + bias
/// acc = srdhm(acc << left_shift, multiplier)
/// acc = rounding_divide_by_pot(acc, right_shift)
/// result = clamp(acc + offset, activation_min, activation_max)
/// ```
///
/// Each `tick` samples one `RequantInput`; `result` four ticks later is the
/// requantized value for it. Stages never stall.
#[derive(Clone, Debug, Default)]
pub struct RequantizationPipeline {
    regs: PipelineRegs,
    stage: OutputStage,
}

impl RequantizationPipeline {
    pub const LATENCY: usize = 1 + Srdhm::LATENCY;

    pub fn new(stage: OutputStage) -> Self { Self { regs: PipelineRegs::default(), stage } }

    pub fn output_stage(&self) -> &OutputStage { &self.stage }

    /// Change offset and bounds. Takes effect on whatever leaves the pipeline next.
    pub fn set_output_stage(&mut self, stage: OutputStage) { self.stage = stage; }

    pub fn tick(&mut self, input: RequantInput) { self.regs = self.regs.next(&input); }

    pub fn result(&self) -> i32 { self.regs.output(&self.stage) }

    /// Clear all in-flight state, keeping the configuration.
    pub fn reset(&mut self) { self.regs = PipelineRegs::default(); }
}
