use serde::{Deserialize, Serialize};

/// Per-output-channel requantization parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelParameters {
    pub bias: i32,
    pub multiplier: i32,
    pub shift: i32,
}

/// Source of per-channel parameters.
///
/// The getters return the value for the channel currently being processed. A
/// `next_*` call asks the store to have the following channel's value ready on
/// the next tick. Each parameter advances independently.
pub trait ParameterStore {
    fn bias(&self) -> i32;
    fn multiplier(&self) -> i32;
    fn shift(&self) -> i32;

    fn next_bias(&mut self);
    fn next_multiplier(&mut self);
    fn next_shift(&mut self);
}

/// In-memory parameter store. One read cursor per parameter; cursors wrap back to
/// channel 0 after the last channel so a layer can be replayed for the next pixel.
#[derive(Clone, Debug, Default)]
pub struct ChannelParamStore {
    channels: Vec<ChannelParameters>,
    bias_at: usize,
    multiplier_at: usize,
    shift_at: usize,
}

impl ChannelParamStore {
    pub fn new(channels: Vec<ChannelParameters>) -> Self {
        Self { channels, bias_at: 0, multiplier_at: 0, shift_at: 0 }
    }

    pub fn len(&self) -> usize { self.channels.len() }

    pub fn is_empty(&self) -> bool { self.channels.is_empty() }

    /// Rewind all cursors to channel 0.
    pub fn reset(&mut self) { self.bias_at = 0; self.multiplier_at = 0; self.shift_at = 0; }

    /// Cursor positions as (bias, multiplier, shift).
    pub fn cursors(&self) -> (usize, usize, usize) { (self.bias_at, self.multiplier_at, self.shift_at) }

    fn read(&self, at: usize, field: impl Fn(&ChannelParameters) -> i32) -> i32 {
        // an empty store serves zeros
        self.channels.get(at).map_or(0, field)
    }

    fn advance(&self, at: usize) -> usize {
        if self.channels.is_empty() { 0 } else { (at + 1) % self.channels.len() }
    }
}

impl ParameterStore for ChannelParamStore {
    fn bias(&self) -> i32 { self.read(self.bias_at, |c| c.bias) }
    fn multiplier(&self) -> i32 { self.read(self.multiplier_at, |c| c.multiplier) }
    fn shift(&self) -> i32 { self.read(self.shift_at, |c| c.shift) }

    fn next_bias(&mut self) { self.bias_at = self.advance(self.bias_at); }
    fn next_multiplier(&mut self) { self.multiplier_at = self.advance(self.multiplier_at); }
    fn next_shift(&mut self) { self.shift_at = self.advance(self.shift_at); }
}
