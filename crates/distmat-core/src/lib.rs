//! # distmat-core
//!
//! **Matrix multiplication where every entry is a distribution.**
//!
//! Each matrix entry is built from a file of observed samples and carried through the
//! ordinary triple-loop multiplication as a distributional value. The multiplication code
//! only knows `zero`, `+` and `*`; the value type decides how uncertainty propagates.
//!
//! ## Quick Start
//!
//! ```
//! use distmat_core::{Empirical, FromSamples, Matrix, Numeric, SampleSet, multiply};
//!
//! let x = Empirical::from_samples(&SampleSet::new(vec![0.9, 1.0, 1.1]).unwrap());
//! let a = Matrix::from_rows(vec![vec![x.clone(), Empirical::zero()]]).unwrap();
//! let b = Matrix::from_rows(vec![vec![Empirical::point(2.0)], vec![x]]).unwrap();
//!
//! let c = multiply(&a, &b).unwrap();
//! assert!((c[(0, 0)].representative() - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Architecture
//!
//! Sample files → [`SampleSet`] → value ([`FromSamples`]) → [`Matrix`] → [`multiply`]
//! → output
//!
//! Two backends implement the [`Numeric`] capability set:
//! - **[`Empirical`]** (default): particle clouds, randomly paired with a content-seeded RNG
//!   so runs are reproducible; means are matched exactly.
//! - **[`Moments`]**: analytic mean/variance propagation.
//!
//! Distinct matrix entries are treated as independent, even when two entries were loaded
//! from the same sample file.

pub mod backend;
pub mod empirical;
pub mod error;
pub mod job;
pub mod matrix;
pub mod moments;
pub mod multiply;
pub mod numeric;
pub mod samples;

pub use backend::Backend;
pub use empirical::Empirical;
pub use error::{Error, Result};
pub use job::{DEFAULT_PREFIX_A, DEFAULT_PREFIX_B, MultiplyJob, Product};
pub use matrix::{DEFAULT_MAX_DIM, Limits, Matrix, Shape};
pub use moments::Moments;
pub use multiply::{check_compatible, multiply};
pub use numeric::{Describe, FromSamples, Numeric, Summary};
pub use samples::{SampleSet, entry_path, load_matrix, load_samples, parse_samples};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
