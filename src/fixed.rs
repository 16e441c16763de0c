//! Fixed-point scalar kernels shared by the pipeline stages and the reference model.
//!
//! Everything here is combinational: pure functions over `i32` with wrapping
//! two's-complement arithmetic, except the explicit SRDHM saturation.

pub const INT32_MIN: i32 = i32::MIN;
pub const INT32_MAX: i32 = i32::MAX;

/// Rounding nudge added to the 64-bit product before taking the high word.
/// Applied for negative products too; see `srdhm`.
pub const SRDHM_NUDGE: i64 = 1 << 30;

/// Shift amounts travel on 5-bit ports.
pub const SHIFT_MASK: u32 = 0x1f;

/// The only operand pair whose doubled high word does not fit in 32 bits.
#[inline]
pub fn srdhm_overflows(a: i32, b: i32) -> bool { a == INT32_MIN && b == INT32_MIN }

/// Full signed product, stage 1 of the multiply.
#[inline]
pub fn srdhm_product(a: i32, b: i32) -> i64 { (a as i64) * (b as i64) }

/// Bits 62..31 of `product + nudge`, stage 2 of the multiply.
#[inline]
pub fn srdhm_high_word(product: i64) -> i32 {
    // |product| <= 2^62 so the nudge cannot overflow
    ((product + SRDHM_NUDGE) >> 31) as i32
}

/// Saturating rounding doubling high multiply (gemmlowp's SaturatingRoundingDoublingHighMul).
///
/// The nudge is always `+2^30`, also for negative products, where the usual
/// formulation uses `1 - 2^30`. Combined with the flooring shift this rounds
/// negative ties toward positive infinity: `srdhm(-1, 1 << 30) == 0`. gemmlowp
/// pairs its negative nudge with a truncating division and lands on the same
/// values; changing only the nudge here would not. Kept as is for parity with
/// the accelerator.
#[inline]
pub fn srdhm(a: i32, b: i32) -> i32 {
    if srdhm_overflows(a, b) { INT32_MAX } else { srdhm_high_word(srdhm_product(a, b)) }
}

/// Divide by `2^exponent`, rounding to nearest (gemmlowp's RoundingDivideByPOT).
///
/// Only the low five bits of `exponent` are used. Positive ties round up,
/// negative ties round away from zero.
#[inline]
pub fn rounding_divide_by_pot(x: i32, exponent: u32) -> i32 {
    let e = exponent & SHIFT_MASK;
    let mask = ((1u32 << e) - 1) as i32;
    let remainder = x & mask;
    let threshold = (mask >> 1) + i32::from(x < 0);
    (x >> e) + i32::from(remainder > threshold)
}

/// Bounded clamp. With `lo > hi` the result is `lo` for values below `lo`,
/// otherwise `hi`; callers must not rely on it.
#[inline]
pub fn clamp(value: i32, lo: i32, hi: i32) -> i32 {
    if value < lo { lo } else if value > hi { hi } else { value }
}

/// Split a signed per-channel shift into `(left, right)`; exactly one side is used.
#[inline]
pub fn split_shift(shift: i32) -> (u32, u32) {
    if shift > 0 {
        (shift as u32 & SHIFT_MASK, 0)
    } else {
        (0, shift.wrapping_neg() as u32 & SHIFT_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_shift_is_exclusive() {
        assert_eq!(split_shift(3), (3, 0));
        assert_eq!(split_shift(0), (0, 0));
        assert_eq!(split_shift(-7), (0, 7));
        assert_eq!(split_shift(31), (31, 0));
        assert_eq!(split_shift(-31), (0, 31));
        // wider values are truncated to the port width
        assert_eq!(split_shift(33), (1, 0));
        assert_eq!(split_shift(i32::MIN), (0, 0));
    }

    #[test]
    fn high_word_of_max_product_wraps_without_saturation_flag() {
        assert_eq!(srdhm_high_word(srdhm_product(INT32_MIN, INT32_MIN)), INT32_MIN);
        assert!(srdhm_overflows(INT32_MIN, INT32_MIN));
        assert!(!srdhm_overflows(INT32_MIN, INT32_MAX));
    }
}
