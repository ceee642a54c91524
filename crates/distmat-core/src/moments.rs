//! Analytic backend: first and second moments under independence.
//!
//! For independent `X` and `Y`:
//! - `E[X + Y] = μx + μy`, `Var(X + Y) = σx² + σy²`
//! - `E[XY] = μx·μy`, `Var(XY) = σx²σy² + σx²μy² + σy²μx²`
//!
//! Both rules are exact for the first two moments, so this backend is deterministic and
//! free of sampling noise. Interval summaries use a Normal approximation.

use std::ops::{Add, Mul};

use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

use crate::numeric::{Describe, FromSamples, LOWER_PERCENTILE, Numeric, Summary, UPPER_PERCENTILE};
use crate::samples::SampleSet;

/// Mean and variance of an uncertain quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    mean: f64,
    variance: f64,
}

impl Moments {
    /// Negative variances (rounding residue) are clamped to zero.
    pub fn new(mean: f64, variance: f64) -> Self {
        Self {
            mean,
            variance: variance.max(0.0),
        }
    }

    pub fn point(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

impl Add for Moments {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.mean + rhs.mean, self.variance + rhs.variance)
    }
}

impl Mul for Moments {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let variance = self.variance * rhs.variance
            + self.variance * rhs.mean * rhs.mean
            + rhs.variance * self.mean * self.mean;
        Self::new(self.mean * rhs.mean, variance)
    }
}

impl Numeric for Moments {
    fn zero() -> Self {
        Self::point(0.0)
    }

    fn representative(&self) -> f64 {
        self.mean
    }
}

impl FromSamples for Moments {
    fn from_samples(samples: &SampleSet) -> Self {
        let values = samples.as_slice();
        if values.len() == 1 {
            return Self::point(values[0]);
        }
        Self::new(values.iter().mean(), values.iter().population_variance())
    }
}

impl Describe for Moments {
    fn summary(&self) -> Summary {
        let std_dev = self.std_dev();
        match Normal::new(self.mean, std_dev) {
            Ok(normal) if std_dev > 0.0 => Summary {
                mean: self.mean,
                std_dev,
                lower: normal.inverse_cdf(LOWER_PERCENTILE as f64 / 100.0),
                upper: normal.inverse_cdf(UPPER_PERCENTILE as f64 / 100.0),
            },
            _ => Summary {
                std_dev,
                ..Summary::point(self.mean)
            },
        }
    }
}
