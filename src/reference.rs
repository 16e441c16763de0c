//! Scalar requantization, no pipeline. Same arithmetic as `RequantizationPipeline`,
//! used as the golden model for parity checks.
use crate::fixed::{rounding_divide_by_pot, split_shift, srdhm};
use crate::pipeline::OutputStage;
use crate::store::ChannelParameters;

#[inline]
pub fn requantize(accumulator: i32, params: &ChannelParameters, stage: &OutputStage) -> i32 {
    let with_bias = accumulator.wrapping_add(params.bias);
    let (left_shift, right_shift) = split_shift(params.shift);
    let scaled = srdhm(with_bias.wrapping_shl(left_shift), params.multiplier);
    stage.apply(rounding_divide_by_pot(scaled, right_shift))
}

/// Requantize a run of accumulators, one channel each, cycling through `channels`
/// the same way `ChannelParamStore` does.
pub fn requantize_channels(accumulators: &[i32], channels: &[ChannelParameters], stage: &OutputStage) -> Vec<i32> {
    accumulators.iter()
        .zip(channels.iter().cycle())
        .map(|(&acc, params)| requantize(acc, params, stage))
        .collect()
}
