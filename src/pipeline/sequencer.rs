/// Fixed-depth shift register used to align values and pulses with a known latency.
///
/// `taps()[0]` holds the value presented one tick ago, `taps()[N - 1]` the one
/// presented `N` ticks ago.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayLine<T: Copy + Default, const N: usize> {
    taps: [T; N],
}

/// Pulse tracker: one bit per in-flight `start`.
pub type Sequencer<const N: usize> = DelayLine<bool, N>;

impl<T: Copy + Default, const N: usize> Default for DelayLine<T, N> {
    fn default() -> Self { Self { taps: [T::default(); N] } }
}

impl<T: Copy + Default, const N: usize> DelayLine<T, N> {
    pub fn new() -> Self { Self::default() }

    /// State after one tick with `input` on the line's entry.
    pub fn next(&self, input: T) -> Self {
        let mut taps = [T::default(); N];
        if N > 0 {
            taps[0] = input;
            taps[1..].copy_from_slice(&self.taps[..N - 1]);
        }
        Self { taps }
    }

    pub fn taps(&self) -> &[T; N] { &self.taps }

    /// Value leaving the line this tick.
    pub fn output(&self) -> T { self.taps.last().copied().unwrap_or_default() }
}

impl<const N: usize> DelayLine<bool, N> {
    /// Number of pulses currently in flight.
    pub fn in_flight(&self) -> usize { self.taps.iter().filter(|&&t| t).count() }
}
