//! Generic matrix multiplication.
//!
//! [`multiply`] only uses `T::zero()`, `+` and `*`. It runs unchanged on `f64`, on
//! [`Empirical`](crate::Empirical) particle clouds and on [`Moments`](crate::Moments).

use log::debug;

use crate::error::{Error, Result};
use crate::matrix::{Matrix, Shape};
use crate::numeric::Numeric;

/// Fail with [`Error::DimensionMismatch`] unless `a`'s columns equal `b`'s rows.
pub fn check_compatible(a: Shape, b: Shape) -> Result<Shape> {
    if a.cols != b.rows {
        return Err(Error::DimensionMismatch {
            cols_a: a.cols,
            rows_b: b.rows,
        });
    }
    Ok(Shape::new(a.rows, b.cols))
}

/// `a × b`, with each entry accumulated from `T::zero()` in ascending inner index.
///
/// Shapes are checked before any entry is computed.
pub fn multiply<T: Numeric>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let shape = check_compatible(a.shape(), b.shape())?;
    let inner = a.cols();
    debug!("multiplying {} by {} into {shape}", a.shape(), b.shape());

    Matrix::from_fn(shape, |i, j| {
        let mut acc = T::zero();
        for t in 0..inner {
            acc = acc + a[(i, t)].clone() * b[(t, j)].clone();
        }
        acc
    })
}
