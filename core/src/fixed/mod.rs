//! Deterministic binary fixed-point arithmetic
//!
//! Used instead of floating point wherever simulation results must be
//! bit-identical across platforms. All values are a raw i64 in Q47.16.

mod point;

pub use point::{FixedPoint, FRACTIONAL_BITS};
