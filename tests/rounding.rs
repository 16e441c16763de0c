use requant_core::{clamp, rounding_divide_by_pot, INT32_MAX, INT32_MIN};

#[test]
fn exponent_zero_is_identity() {
    for x in [INT32_MIN, INT32_MIN + 1, -1_000_001, -2, -1, 0, 1, 2, 999_999, INT32_MAX - 1, INT32_MAX] {
        assert_eq!(rounding_divide_by_pot(x, 0), x, "x={}", x);
    }
}

#[test]
fn positive_tie_boundary() {
    // e=2: mask 3, threshold 1
    assert_eq!(rounding_divide_by_pot(5, 2), 1, "remainder == threshold must not round");
    assert_eq!(rounding_divide_by_pot(6, 2), 2, "remainder == threshold + 1 must round");
    // e=4: mask 15, threshold 7
    assert_eq!(rounding_divide_by_pot(16 * 3 + 7, 4), 3);
    assert_eq!(rounding_divide_by_pot(16 * 3 + 8, 4), 4);
}

#[test]
fn negative_tie_boundary() {
    // e=2: threshold 2 for negative x
    assert_eq!(-6 & 3, 2);
    assert_eq!(rounding_divide_by_pot(-6, 2), -2, "remainder == threshold must not round");
    assert_eq!(-5 & 3, 3);
    assert_eq!(rounding_divide_by_pot(-5, 2), -1, "remainder == threshold + 1 must round");
    // e=4: threshold 8
    assert_eq!(rounding_divide_by_pot(-24, 4), -2);
    assert_eq!(rounding_divide_by_pot(-23, 4), -1);
}

#[test]
fn rounds_to_nearest_away_from_ties() {
    assert_eq!(rounding_divide_by_pot(7, 2), 2);
    assert_eq!(rounding_divide_by_pot(-7, 2), -2);
    assert_eq!(rounding_divide_by_pot(1, 1), 1);
    assert_eq!(rounding_divide_by_pot(-1, 1), -1);
    assert_eq!(rounding_divide_by_pot(-3, 1), -2);
    assert_eq!(rounding_divide_by_pot(3, 1), 2);
}

#[test]
fn extreme_exponent() {
    assert_eq!(rounding_divide_by_pot(INT32_MIN, 31), -1);
    assert_eq!(rounding_divide_by_pot(INT32_MAX, 31), 1);
    assert_eq!(rounding_divide_by_pot(1 << 29, 31), 0);
    assert_eq!(rounding_divide_by_pot((1 << 30) + 1, 31), 1);
}

#[test]
fn exponent_uses_low_five_bits() {
    assert_eq!(rounding_divide_by_pot(6, 34), rounding_divide_by_pot(6, 2));
    assert_eq!(rounding_divide_by_pot(-99, 32), -99);
}

#[test]
fn clamp_boundaries() {
    let (lo, hi) = (-128, 127);
    assert_eq!(clamp(-129, lo, hi), lo);
    assert_eq!(clamp(-128, lo, hi), -128);
    assert_eq!(clamp(-127, lo, hi), -127);
    assert_eq!(clamp(126, lo, hi), 126);
    assert_eq!(clamp(127, lo, hi), 127);
    assert_eq!(clamp(128, lo, hi), hi);
    assert_eq!(clamp(INT32_MIN, lo, hi), lo);
    assert_eq!(clamp(INT32_MAX, lo, hi), hi);
    assert_eq!(clamp(5, 5, 5), 5);
    assert_eq!(clamp(INT32_MIN, INT32_MIN, INT32_MAX), INT32_MIN);
    assert_eq!(clamp(INT32_MAX, INT32_MIN, INT32_MAX), INT32_MAX);
}
