//! Fixed-extent, row-major matrices over any element type.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::numeric::{Describe, Numeric, Summary};

/// Benchmark default for the largest accepted row or column count.
pub const DEFAULT_MAX_DIM: usize = 8;

/// Row and column extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of entries. Fails with `AllocationFailure` when the count overflows `usize`.
    pub fn entry_count(&self) -> Result<usize> {
        self.rows
            .checked_mul(self.cols)
            .ok_or_else(|| self.allocation_failure())
    }

    /// Reject zero extents, then return the entry count.
    pub fn validate(&self) -> Result<usize> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::Argument(format!(
                "matrix extents must be at least 1, not {self}"
            )));
        }
        self.entry_count()
    }

    fn allocation_failure(&self) -> Error {
        Error::AllocationFailure {
            what: format!("entries of a {self} matrix"),
            requested: self.rows as u128 * self.cols as u128,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Validation bound on matrix extents.
///
/// The bound is a policy carried over from fixed-size benchmark buffers, not a limit of the
/// multiplication itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_dim: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dim: DEFAULT_MAX_DIM,
        }
    }
}

impl Limits {
    /// Fails unless `max_dim` is at least 1.
    pub fn new(max_dim: usize) -> Result<Self> {
        if max_dim == 0 {
            return Err(Error::Argument(
                "Option --max-dim should be at least 1, not 0".into(),
            ));
        }
        Ok(Self { max_dim })
    }

    /// Check one extent against `[1, max_dim]`. `label` names the offending input.
    pub fn check(&self, label: &str, value: usize) -> Result<usize> {
        if value < 1 || value > self.max_dim {
            return Err(Error::Argument(format!(
                "Option {label} should be between 1 and {}, not {value}",
                self.max_dim
            )));
        }
        Ok(value)
    }
}

/// A `rows × cols` matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Fill every entry from `f(row, col)`, row by row.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        Self::try_from_fn(shape, |row, col| Ok(f(row, col)))
    }

    /// Like [`Matrix::from_fn`], stopping at the first error.
    ///
    /// The whole buffer is reserved before `f` is first called.
    pub fn try_from_fn(shape: Shape, mut f: impl FnMut(usize, usize) -> Result<T>) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(shape.entry_count()?)
            .map_err(|_| shape.allocation_failure())?;
        for row in 0..shape.rows {
            for col in 0..shape.cols {
                data.push(f(row, col)?);
            }
        }
        Ok(Self { shape, data })
    }

    /// Build from nested rows. Rows must be non-empty and of equal length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(Error::Argument("matrix must have at least one entry".into()));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(Error::Argument(format!(
                "row {bad} has {} entries, expected {cols}",
                rows[bad].len()
            )));
        }
        let shape = Shape::new(rows.len(), cols);
        Ok(Self {
            shape,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.shape.rows && col < self.shape.cols {
            self.data.get(row * self.shape.cols + col)
        } else {
            None
        }
    }

    /// Entries of one row.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.shape.cols;
        &self.data[start..start + self.shape.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.shape.cols.max(1))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            shape: self.shape,
            data: self.data.iter().map(&mut f).collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.shape.rows && col < self.shape.cols,
            "index ({row}, {col}) out of bounds for {} matrix",
            self.shape
        );
        &self.data[row * self.shape.cols + col]
    }
}

impl<T: Numeric> Matrix<T> {
    /// A matrix of additive identities.
    pub fn zeros(shape: Shape) -> Result<Self> {
        Self::from_fn(shape, |_, _| T::zero())
    }

    /// Representative scalar of every entry.
    pub fn representatives(&self) -> Matrix<f64> {
        self.map(Numeric::representative)
    }
}

impl<T: Describe> Matrix<T> {
    pub fn summaries(&self) -> Matrix<Summary> {
        self.map(Describe::summary)
    }

    /// Summaries as nested rows, for serialization.
    pub fn summary_rows(&self) -> Vec<Vec<Summary>> {
        self.iter_rows()
            .map(|row| row.iter().map(Describe::summary).collect())
            .collect()
    }
}

/// One line per row, tab-separated representatives with six decimals.
impl<T: Numeric> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str("\t")?;
                }
                write!(f, "{:.6}", value.representative())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
