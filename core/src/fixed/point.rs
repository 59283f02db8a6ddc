//! Q47.16 fixed-point number
//!
//! A single signed 64-bit raw value representing `value * 2^16`. Integer
//! arithmetic only, so results are bit-identical on every CPU architecture
//! and compiler — the same guarantee the rest of the simulation core makes.
//!
//! # Overflow
//!
//! Arithmetic must stay representable in the raw i64; overflow is a caller
//! error. Debug builds panic on raw overflow, release builds wrap
//! deterministically. Multiplication and division widen intermediates
//! through i128 before re-applying the fractional shift, so they never
//! overflow before the shift; a post-shift result outside i64 trips the
//! same debug panic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Number of fractional bits in the representation
pub const FRACTIONAL_BITS: u32 = 16;

/// Scale factor: 2^16
const SCALE: i64 = 1 << FRACTIONAL_BITS;

/// Decimal digits rendered by `Display` (2^-16 ≈ 1.5e-5)
const DISPLAY_DIGITS: u64 = 100_000;

/// Deterministic binary fixed-point number (Q47.16)
///
/// # Example
/// ```
/// use roguelike_sim_core_rs::FixedPoint;
///
/// let damage = FixedPoint::from_int(12) * FixedPoint::HALF;
/// assert_eq!(damage.to_int(), 6);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct FixedPoint {
    /// Raw representation: `value * 2^16`
    raw: i64,
}

impl FixedPoint {
    /// The value 0
    pub const ZERO: FixedPoint = FixedPoint { raw: 0 };

    /// The value 1
    pub const ONE: FixedPoint = FixedPoint { raw: SCALE };

    /// The value 0.5
    pub const HALF: FixedPoint = FixedPoint { raw: SCALE / 2 };

    /// Create from an integer value
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::FixedPoint;
    ///
    /// assert_eq!(FixedPoint::from_int(3).to_int(), 3);
    /// ```
    pub const fn from_int(value: i64) -> Self {
        Self { raw: value * SCALE }
    }

    /// Create from a raw Q47.16 representation
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    /// Get the raw Q47.16 representation
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Create from a float, rounding half away from zero on the scaled value
    ///
    /// The rounding is fixed regardless of host locale or FPU rounding mode,
    /// so the same float always yields the same raw value on every platform.
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::FixedPoint;
    ///
    /// assert_eq!(FixedPoint::from_float(0.5), FixedPoint::HALF);
    /// assert_eq!(FixedPoint::from_float(-0.5), -FixedPoint::HALF);
    /// ```
    pub fn from_float(value: f64) -> Self {
        let scaled = value * SCALE as f64;
        let rounded = if scaled >= 0.0 {
            (scaled + 0.5).floor()
        } else {
            (scaled - 0.5).ceil()
        };
        Self { raw: rounded as i64 }
    }

    /// Convert to integer, truncating the fraction toward zero
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::FixedPoint;
    ///
    /// let x = FixedPoint::from_int(7) / FixedPoint::from_int(2); // 3.5
    /// assert_eq!(x.to_int(), 3);
    /// assert_eq!((-x).to_int(), -3);
    /// ```
    pub const fn to_int(self) -> i64 {
        self.raw / SCALE
    }

    /// Absolute value, always >= ZERO
    pub const fn abs(self) -> Self {
        Self { raw: self.raw.abs() }
    }

    /// Clamp into `[min, max]`
    ///
    /// # Panics
    /// Panics if `min > max`.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        assert!(min <= max, "FixedPoint clamp requires min <= max");
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }

    /// Linear interpolation between `self` and `other`
    ///
    /// `t` is unconstrained: values outside `[0, 1]` extrapolate. Exact at
    /// `t = 0` (returns `self`) and `t = 1` (returns `other`), and monotonic
    /// in `t` for fixed endpoints.
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::FixedPoint;
    ///
    /// let a = FixedPoint::from_int(10);
    /// let b = FixedPoint::from_int(20);
    /// assert_eq!(a.lerp(b, FixedPoint::HALF).to_int(), 15);
    /// ```
    pub fn lerp(self, other: Self, t: Self) -> Self {
        self + (other - self) * t
    }

    /// Square root via integer Newton iteration over the widened raw value
    ///
    /// Exact for perfect squares; monotonic with bounded error otherwise.
    ///
    /// # Panics
    /// Panics for negative input — a logic bug upstream, not a recoverable
    /// runtime condition.
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::FixedPoint;
    ///
    /// assert_eq!(FixedPoint::from_int(9).sqrt().to_int(), 3);
    /// ```
    pub fn sqrt(self) -> Self {
        assert!(self.raw >= 0, "FixedPoint sqrt of negative value");
        // sqrt(raw / 2^16) * 2^16 == isqrt(raw << 16)
        let widened = (self.raw as u128) << FRACTIONAL_BITS;
        Self {
            raw: isqrt(widened) as i64,
        }
    }
}

/// Integer square root: largest x with x * x <= n
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    // Initial guess >= sqrt(n), then Newton descent
    let mut x = 1u128 << ((128 - n.leading_zeros() + 1) / 2);
    let mut y = (x + n / x) >> 1;
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}

impl Add for FixedPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { raw: self.raw + rhs.raw }
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { raw: self.raw - rhs.raw }
    }
}

impl Neg for FixedPoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self { raw: -self.raw }
    }
}

impl Mul for FixedPoint {
    type Output = Self;

    /// Widens through i128 before re-applying the fractional shift.
    /// The shift rounds toward negative infinity.
    fn mul(self, rhs: Self) -> Self {
        let wide = (self.raw as i128 * rhs.raw as i128) >> FRACTIONAL_BITS;
        debug_assert!(
            i64::try_from(wide).is_ok(),
            "FixedPoint multiply overflow"
        );
        Self { raw: wide as i64 }
    }
}

impl Div for FixedPoint {
    type Output = Self;

    /// # Panics
    /// Panics on division by `ZERO` — a programmer error in a low-level
    /// numeric primitive.
    fn div(self, rhs: Self) -> Self {
        assert!(rhs.raw != 0, "FixedPoint division by zero");
        let wide = ((self.raw as i128) << FRACTIONAL_BITS) / rhs.raw as i128;
        debug_assert!(i64::try_from(wide).is_ok(), "FixedPoint divide overflow");
        Self { raw: wide as i64 }
    }
}

impl From<i64> for FixedPoint {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<i32> for FixedPoint {
    fn from(value: i32) -> Self {
        Self::from_int(value as i64)
    }
}

impl fmt::Display for FixedPoint {
    /// Fixed-precision decimal, never scientific notation, locale-independent
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.raw < 0 { "-" } else { "" };
        let magnitude = self.raw.unsigned_abs();
        let integer = magnitude >> FRACTIONAL_BITS;
        let fraction = (magnitude & (SCALE as u64 - 1)) * DISPLAY_DIGITS / SCALE as u64;
        write!(f, "{}{}.{:05}", sign, integer, fraction)
    }
}
