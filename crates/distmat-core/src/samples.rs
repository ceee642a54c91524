//! Sample files: parsing, naming, and loading whole matrices of them.
//!
//! # File Format
//!
//! ```text
//! 4
//! 0.91
//! 1.07
//! 0.98
//! 1.02
//! ```
//!
//! The first token is the declared sample count `N` (a positive integer), followed by `N`
//! whitespace-separated floating-point samples. Anything after the `N`-th sample is ignored.
//!
//! Entry `(i, j)` of a matrix stored under prefix `P` lives in `P-i-j.txt`, with zero-based,
//! unpadded decimal indices.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::matrix::{Matrix, Shape};
use crate::numeric::FromSamples;

/// Observed values of one uncertain scalar. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    values: Vec<f64>,
}

impl SampleSet {
    /// Wrap a non-empty sample vector. Returns `None` for an empty one.
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    /// A single observation.
    pub fn point(value: f64) -> Self {
        Self {
            values: vec![value],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Path of the sample file for entry `(row, col)` under `prefix`.
pub fn entry_path(prefix: &str, row: usize, col: usize) -> PathBuf {
    PathBuf::from(format!("{prefix}-{row}-{col}.txt"))
}

/// Parse the contents of a sample file. `origin` is only used in error messages.
pub fn parse_samples(text: &str, origin: &Path) -> Result<SampleSet> {
    let mut tokens = text.split_whitespace();

    let count_token = tokens
        .next()
        .ok_or_else(|| Error::malformed(origin, "missing sample count"))?;
    let declared: i64 = count_token.parse().map_err(|_| {
        Error::malformed(
            origin,
            format!("sample count `{count_token}` is not an integer"),
        )
    })?;
    if declared <= 0 {
        return Err(Error::malformed(
            origin,
            format!("declared sample count {declared} must be positive"),
        ));
    }
    let count = usize::try_from(declared).map_err(|_| Error::AllocationFailure {
        what: format!("samples from {}", origin.display()),
        requested: declared as u128,
    })?;

    let mut values = Vec::new();
    values
        .try_reserve_exact(count)
        .map_err(|_| Error::AllocationFailure {
            what: format!("samples from {}", origin.display()),
            requested: count as u128,
        })?;

    for index in 0..count {
        let token = tokens.next().ok_or_else(|| {
            Error::malformed(
                origin,
                format!("declared {count} samples but found only {index}"),
            )
        })?;
        let value: f64 = token.parse().map_err(|_| {
            Error::malformed(origin, format!("sample {index} (`{token}`) is not a number"))
        })?;
        values.push(value);
    }

    let trailing = tokens.count();
    if trailing > 0 {
        warn!(
            "{}: ignoring {trailing} token(s) after the declared {count} samples",
            origin.display()
        );
    }

    Ok(SampleSet { values })
}

/// Read and parse one sample file.
pub fn load_samples(path: &Path) -> Result<SampleSet> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::InvalidData {
            Error::malformed(path, "file is not valid UTF-8 text")
        } else {
            Error::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let samples = parse_samples(&text, path)?;
    info!(
        "Number of samples from {}: {}",
        path.display(),
        samples.len()
    );
    Ok(samples)
}

/// Load every entry of a `shape`-sized matrix stored under `prefix`, row by row.
///
/// Stops at the first entry that fails to load.
pub fn load_matrix<T: FromSamples>(prefix: &str, shape: Shape) -> Result<Matrix<T>> {
    debug!("loading {shape} matrix from prefix {prefix}");
    Matrix::try_from_fn(shape, |row, col| {
        let samples = load_samples(&entry_path(prefix, row, col))?;
        Ok(T::from_samples(&samples))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> &'static Path {
        Path::new("input-A-0-0.txt")
    }

    #[test]
    fn test_entry_path_uses_unpadded_indices() {
        assert_eq!(
            entry_path("gaussian/input-A", 3, 10),
            PathBuf::from("gaussian/input-A-3-10.txt")
        );
    }

    #[test]
    fn test_parse_newline_separated() {
        let s = parse_samples("3\n1.5\n-2.0\n4e-1\n", origin()).unwrap();
        assert_eq!(s.as_slice(), &[1.5, -2.0, 0.4]);
    }

    #[test]
    fn test_parse_mixed_whitespace() {
        let s = parse_samples("  2 \t 7.25   8\n", origin()).unwrap();
        assert_eq!(s.as_slice(), &[7.25, 8.0]);
    }

    #[test]
    fn test_parse_single_sample() {
        let s = parse_samples("1\n0.0\n", origin()).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.as_slice()[0], 0.0);
    }

    #[test]
    fn test_parse_ignores_trailing_tokens() {
        let s = parse_samples("2 1 2 3 4", origin()).unwrap();
        assert_eq!(s.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_parse_empty_file() {
        let err = parse_samples("   \n", origin()).unwrap_err();
        assert!(matches!(err, Error::MalformedSampleData { .. }));
    }

    #[test]
    fn test_parse_zero_count() {
        let err = parse_samples("0\n", origin()).unwrap_err();
        assert!(matches!(err, Error::MalformedSampleData { .. }));
    }

    #[test]
    fn test_parse_negative_count() {
        let err = parse_samples("-4\n1\n2\n", origin()).unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_parse_fractional_count() {
        let err = parse_samples("2.5\n1\n2\n", origin()).unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }

    #[test]
    fn test_parse_too_few_samples() {
        let err = parse_samples("5\n1.0\n2.0\n3.0\n", origin()).unwrap_err();
        match err {
            Error::MalformedSampleData { path, reason } => {
                assert_eq!(path, origin());
                assert_eq!(reason, "declared 5 samples but found only 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_non_numeric_sample() {
        let err = parse_samples("3\n1.0\nabc\n3.0\n", origin()).unwrap_err();
        assert!(err.to_string().contains("sample 1 (`abc`)"));
    }

    #[test]
    fn test_parse_unreservable_count() {
        let err = parse_samples("9000000000000000000\n1.0\n", origin()).unwrap_err();
        match err {
            Error::AllocationFailure { what, requested } => {
                assert_eq!(requested, 9_000_000_000_000_000_000);
                assert!(what.contains("input-A-0-0.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_samples(&tmp.path().join("absent-0-0.txt")).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("m-0-0.txt");
        fs::write(&path, "2\n3.5\n4.5\n").unwrap();
        let s = load_samples(&path).unwrap();
        assert_eq!(s.into_vec(), vec![3.5, 4.5]);
    }

    #[test]
    fn test_sample_set_rejects_empty() {
        assert!(SampleSet::new(Vec::new()).is_none());
        assert_eq!(SampleSet::new(vec![1.0]).unwrap(), SampleSet::point(1.0));
    }
}
