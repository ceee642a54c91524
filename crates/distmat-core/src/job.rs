//! One multiplication run: validate, load both operands, multiply.
//!
//! All shape checks happen in [`MultiplyJob::new`], so a rejected job never touches the
//! filesystem.

use log::debug;

use crate::error::Result;
use crate::matrix::{Matrix, Shape};
use crate::multiply::{check_compatible, multiply};
use crate::numeric::{FromSamples, Numeric};
use crate::samples::load_matrix;

/// Default sample-file prefix for operand A.
pub const DEFAULT_PREFIX_A: &str = "gaussian/input-A";
/// Default sample-file prefix for operand B.
pub const DEFAULT_PREFIX_B: &str = "gaussian/input-B";

/// A validated multiplication request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplyJob {
    prefix_a: String,
    shape_a: Shape,
    prefix_b: String,
    shape_b: Shape,
    result_shape: Shape,
}

/// Operands and result of a finished job.
#[derive(Debug, Clone)]
pub struct Product<T> {
    pub a: Matrix<T>,
    pub b: Matrix<T>,
    pub result: Matrix<T>,
}

impl MultiplyJob {
    /// Fails with `Argument` on a zero extent, `AllocationFailure` when an operand or the
    /// result has more entries than `usize` can count, and `DimensionMismatch` when
    /// `shape_a.cols != shape_b.rows`.
    pub fn new(
        prefix_a: impl Into<String>,
        shape_a: Shape,
        prefix_b: impl Into<String>,
        shape_b: Shape,
    ) -> Result<Self> {
        shape_a.validate()?;
        shape_b.validate()?;
        let result_shape = check_compatible(shape_a, shape_b)?;
        result_shape.entry_count()?;
        Ok(Self {
            prefix_a: prefix_a.into(),
            shape_a,
            prefix_b: prefix_b.into(),
            shape_b,
            result_shape,
        })
    }

    pub fn shape_a(&self) -> Shape {
        self.shape_a
    }

    pub fn shape_b(&self) -> Shape {
        self.shape_b
    }

    pub fn result_shape(&self) -> Shape {
        self.result_shape
    }

    /// Load A, then B, then multiply. Stops at the first failing sample file.
    pub fn run<T: FromSamples + Numeric>(&self) -> Result<Product<T>> {
        let a = load_matrix::<T>(&self.prefix_a, self.shape_a)?;
        let b = load_matrix::<T>(&self.prefix_b, self.shape_b)?;
        let result = multiply(&a, &b)?;
        debug!("job finished with a {} result", result.shape());
        Ok(Product { a, b, result })
    }
}
