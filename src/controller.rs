use log::{debug, trace};

use crate::pipeline::{OutputStage, RequantInput, RequantizationPipeline, Sequencer};
use crate::store::ParameterStore;

/// Signals observed during one controller tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerCycle {
    /// Result of the request issued `LATENCY` ticks ago is valid this tick.
    pub done: bool,
    /// Pipeline output; meaningful only when `done`.
    pub result: i32,
    pub bias_next: bool,
    pub multiplier_next: bool,
    pub shift_next: bool,
}

/// Streams accumulators for consecutive output channels through the
/// requantization pipeline behind a start/done handshake.
///
/// The channel index is implied by processing order: every `start` consumes the
/// store's current bias, multiplier and shift and pulses the matching `*_next`
/// so the store moves on to the next channel. `done` follows each `start` by
/// exactly `LATENCY` ticks. There is no back-pressure.
#[derive(Clone, Debug, Default)]
pub struct ChannelStreamController {
    pipeline: RequantizationPipeline,
    seq: Sequencer<{ RequantizationPipeline::LATENCY }>,
    ticks: u64,
}

impl ChannelStreamController {
    pub const LATENCY: usize = RequantizationPipeline::LATENCY;

    pub fn new(stage: OutputStage) -> Self {
        Self { pipeline: RequantizationPipeline::new(stage), seq: Default::default(), ticks: 0 }
    }

    pub fn output_stage(&self) -> &OutputStage { self.pipeline.output_stage() }

    pub fn done(&self) -> bool { self.seq.output() }

    pub fn result(&self) -> i32 { self.pipeline.result() }

    /// Requests issued but not yet answered.
    pub fn in_flight(&self) -> usize { self.seq.in_flight() }

    pub fn ticks(&self) -> u64 { self.ticks }

    /// One clock tick. Returns what the outside world sees during the tick, then
    /// advances the pipeline and, on `start`, the store.
    pub fn cycle<S: ParameterStore>(&mut self, start: bool, accumulator: i32, store: &mut S) -> ControllerCycle {
        let out = ControllerCycle {
            done: self.done(),
            result: self.result(),
            bias_next: start,
            multiplier_next: start,
            shift_next: start,
        };
        // The pipeline samples its inputs every tick; only starts are tracked.
        let input = RequantInput {
            accumulator,
            bias: store.bias(),
            multiplier: store.multiplier(),
            shift: store.shift(),
        };
        if start || out.done {
            trace!("tick {}: start={} acc={} done={} result={}", self.ticks, start, accumulator, out.done, out.result);
        }
        self.pipeline.tick(input);
        self.seq = self.seq.next(start);
        self.ticks += 1;
        if out.bias_next { store.next_bias(); }
        if out.multiplier_next { store.next_multiplier(); }
        if out.shift_next { store.next_shift(); }
        out
    }

    /// Issue one request per tick for `accumulators` and tick until every result
    /// has come back. Results are in issue order, one per accumulator; requests
    /// already in flight are drained first and their results dropped.
    pub fn run<S: ParameterStore>(&mut self, store: &mut S, accumulators: &[i32]) -> Vec<i32> {
        let mut dropped = 0usize;
        while self.in_flight() > 0 {
            if self.cycle(false, 0, store).done { dropped += 1; }
        }
        if dropped > 0 { debug!("drained {} earlier requests before run", dropped); }
        let started = self.ticks;
        let mut results = Vec::with_capacity(accumulators.len());
        for &acc in accumulators {
            let c = self.cycle(true, acc, store);
            if c.done { results.push(c.result); }
        }
        while self.in_flight() > 0 {
            let c = self.cycle(false, 0, store);
            if c.done { results.push(c.result); }
        }
        debug!("requantized {} accumulators in {} ticks", results.len(), self.ticks - started);
        results
    }

    /// Clear in-flight requests, keeping the configuration.
    pub fn reset(&mut self) {
        self.pipeline.reset();
        self.seq = Default::default();
    }
}
