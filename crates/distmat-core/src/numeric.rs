//! The numeric capability set generic algorithms are written against.
//!
//! A type that implements [`Numeric`] behaves like a plain `f64` as far as `+`, `*` and an
//! additive zero are concerned, so matrix code written for scalars runs unchanged on
//! distributional values. [`Numeric::representative`] projects a value to one scalar for
//! display; arithmetic code must never call it mid-computation.

use std::fmt;
use std::ops::{Add, Mul};

use serde::Serialize;

use crate::samples::SampleSet;

/// Lower percentile of the central interval reported by [`Summary`].
pub const LOWER_PERCENTILE: usize = 5;
/// Upper percentile of the central interval reported by [`Summary`].
pub const UPPER_PERCENTILE: usize = 95;

/// Scalar-like arithmetic: addition, multiplication, and an additive identity.
pub trait Numeric: Clone + Add<Output = Self> + Mul<Output = Self> {
    /// Additive identity. `Self::zero() + x` must equal `x`.
    fn zero() -> Self;

    /// Deterministic scalar projection (the expected value) used for display.
    fn representative(&self) -> f64;
}

/// Construction of a value from an observed sample set. Must be deterministic.
pub trait FromSamples: Sized {
    fn from_samples(samples: &SampleSet) -> Self;
}

/// Spread statistics beyond the representative scalar.
pub trait Describe {
    fn summary(&self) -> Summary;
}

/// Mean, standard deviation and central interval of one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
    /// 5th percentile.
    pub lower: f64,
    /// 95th percentile.
    pub upper: f64,
}

impl Summary {
    /// Summary of a value with no spread.
    pub fn point(value: f64) -> Self {
        Self {
            mean: value,
            std_dev: 0.0,
            lower: value,
            upper: value,
        }
    }

    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.mean, self.std_dev, self.lower, self.upper]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} ± {:.6} [{:.6}, {:.6}]",
            self.mean, self.std_dev, self.lower, self.upper
        )
    }
}

impl Numeric for f64 {
    fn zero() -> Self {
        0.0
    }

    fn representative(&self) -> f64 {
        *self
    }
}

impl Describe for f64 {
    fn summary(&self) -> Summary {
        Summary::point(*self)
    }
}
