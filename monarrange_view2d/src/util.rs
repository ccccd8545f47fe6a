// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers that do not need `std` or `libm`.

/// Truncates toward zero, saturating at the `i32` range. NaN maps to zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "float to int `as` casts truncate toward zero and saturate"
)]
pub(crate) fn trunc_i32(value: f64) -> i32 {
    value as i32
}

/// Largest integer not greater than `value`, saturating at the `i64` range.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "saturating float/int conversion is intended"
)]
pub(crate) fn floor_i64(value: f64) -> i64 {
    let t = value as i64;
    if (t as f64) > value { t - 1 } else { t }
}

/// Rounds half away from zero, saturating at the `i32` range.
pub(crate) fn round_i32(value: f64) -> i32 {
    if value >= 0.0 {
        trunc_i32(value + 0.5)
    } else {
        trunc_i32(value - 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::{floor_i64, round_i32, trunc_i32};

    #[test]
    fn trunc_goes_toward_zero() {
        assert_eq!(trunc_i32(2.9), 2);
        assert_eq!(trunc_i32(-2.9), -2);
        assert_eq!(trunc_i32(f64::NAN), 0);
        assert_eq!(trunc_i32(1e12), i32::MAX);
    }

    #[test]
    fn floor_goes_down() {
        assert_eq!(floor_i64(2.5), 2);
        assert_eq!(floor_i64(-2.5), -3);
        assert_eq!(floor_i64(-3.0), -3);
    }

    #[test]
    fn round_half_away() {
        assert_eq!(round_i32(2.5), 3);
        assert_eq!(round_i32(-2.5), -3);
        assert_eq!(round_i32(2.4), 2);
    }
}
