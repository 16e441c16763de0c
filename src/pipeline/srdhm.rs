use crate::fixed::{srdhm_high_word, srdhm_overflows, srdhm_product, INT32_MAX};

/// Register set of the three-stage SRDHM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SrdhmRegs {
    a: i32,
    b: i32,
    overflow: bool,
    product: i64,
    result: i32,
}

impl SrdhmRegs {
    pub(crate) fn next(&self, a: i32, b: i32) -> Self {
        Self {
            // stage 0: register operands
            a,
            b,
            // stage 1: saturation flag and wide product
            overflow: srdhm_overflows(self.a, self.b),
            product: srdhm_product(self.a, self.b),
            // stage 2: nudge, take the high word, saturate
            result: if self.overflow { INT32_MAX } else { srdhm_high_word(self.product) },
        }
    }

    pub(crate) fn result(&self) -> i32 { self.result }
}

/// Pipelined saturating rounding doubling high multiply.
///
/// Operands presented with `tick` show up in `result` three ticks later; a new
/// pair may be presented every tick.
#[derive(Clone, Debug, Default)]
pub struct Srdhm {
    regs: SrdhmRegs,
}

impl Srdhm {
    pub const LATENCY: usize = 3;

    pub fn new() -> Self { Self::default() }

    /// Present `a`, `b` for this tick and advance the clock.
    pub fn tick(&mut self, a: i32, b: i32) { self.regs = self.regs.next(a, b); }

    pub fn result(&self) -> i32 { self.regs.result() }

    pub fn reset(&mut self) { self.regs = SrdhmRegs::default(); }
}
