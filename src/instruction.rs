//! Start/done handshake as seen by the instruction dispatcher.
//!
//! Operands arrive as raw 32-bit register values; each instruction decides how to
//! interpret them. `done` marks the tick on which `output` is valid.
use crate::controller::ChannelStreamController;
use crate::fixed::rounding_divide_by_pot;
use crate::pipeline::{OutputStage, Srdhm};
use crate::store::ParameterStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub start: bool,
    pub in0: u32,
    pub in1: u32,
}

impl Request {
    pub fn start(in0: u32, in1: u32) -> Self { Self { start: true, in0, in1 } }
    pub fn idle() -> Self { Self::default() }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub done: bool,
    pub output: u32,
}

pub trait Instruction {
    /// One clock tick: the response observed during the tick, then the clock edge.
    fn cycle(&mut self, req: Request) -> Response;
}

const IDLE: i8 = -1;

/// SRDHM of `in0` and `in1`, done three ticks after start.
#[derive(Clone, Debug)]
pub struct SrdhmInstruction {
    srdhm: Srdhm,
    countdown: i8,
}

impl Default for SrdhmInstruction {
    fn default() -> Self { Self { srdhm: Srdhm::new(), countdown: IDLE } }
}

impl SrdhmInstruction {
    pub fn new() -> Self { Self::default() }
}

impl Instruction for SrdhmInstruction {
    fn cycle(&mut self, req: Request) -> Response {
        let resp = Response { done: self.countdown == 0, output: self.srdhm.result() as u32 };
        self.srdhm.tick(req.in0 as i32, req.in1 as i32);
        self.countdown = if req.start {
            (Srdhm::LATENCY - 1) as i8
        } else if self.countdown != IDLE {
            self.countdown - 1
        } else {
            IDLE
        };
        resp
    }
}

/// Rounding divide of `in0` by `2^(in1 & 31)`. Combinational, always done.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundingDivideInstruction;

impl Instruction for RoundingDivideInstruction {
    fn cycle(&mut self, req: Request) -> Response {
        Response { done: true, output: rounding_divide_by_pot(req.in0 as i32, req.in1) as u32 }
    }
}

/// Post-processes the accumulator in `in0` for the next output channel.
pub struct PostProcessInstruction<S: ParameterStore> {
    controller: ChannelStreamController,
    store: S,
}

impl<S: ParameterStore> PostProcessInstruction<S> {
    pub fn new(stage: OutputStage, store: S) -> Self {
        Self { controller: ChannelStreamController::new(stage), store }
    }

    pub fn store(&self) -> &S { &self.store }

    pub fn controller(&self) -> &ChannelStreamController { &self.controller }
}

impl<S: ParameterStore> Instruction for PostProcessInstruction<S> {
    fn cycle(&mut self, req: Request) -> Response {
        let c = self.controller.cycle(req.start, req.in0 as i32, &mut self.store);
        Response { done: c.done, output: c.result as u32 }
    }
}
