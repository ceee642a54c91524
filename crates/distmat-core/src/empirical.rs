//! Monte Carlo backend: values carried as particle clouds.
//!
//! An [`Empirical`] value holds its samples as an immutable, shared particle cloud together
//! with its exact mean. Arithmetic between two clouds pairs particles at random and applies
//! the operation particle by particle, which draws from the independent composition of both
//! distributions.
//!
//! # Pairing
//!
//! - If either operand is a point (one particle), the other cloud is broadcast in order.
//! - Otherwise the result has `max(len x, len y)` particles. Each operand contributes an index
//!   stream built from freshly shuffled permutations of its own indices, tiled to the result
//!   length, so every particle of the shorter cloud is used equally often.
//! - The shuffles are driven by a [`StdRng`] seeded from a SHA-256 digest of the operation and
//!   both clouds. The same inputs always pair the same way, on every run and every machine.
//!
//! # Mean matching
//!
//! The result's mean is the exact composition of the operand means (`μx + μy`, `μx · μy`).
//! The paired cloud is shifted so its empirical mean agrees with it, removing Monte Carlo
//! noise from the representative value.

use std::ops::{Add, Mul};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use sha2::{Digest, Sha256};
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::numeric::{Describe, FromSamples, LOWER_PERCENTILE, Numeric, Summary, UPPER_PERCENTILE};
use crate::samples::SampleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Mul => a * b,
        }
    }

    fn tag(self) -> u8 {
        match self {
            Self::Add => b'+',
            Self::Mul => b'*',
        }
    }
}

/// A distribution represented by a cloud of equally weighted particles.
#[derive(Debug, Clone, PartialEq)]
pub struct Empirical {
    particles: Arc<[f64]>,
    mean: f64,
}

impl Empirical {
    /// Point mass at `value`.
    pub fn point(value: f64) -> Self {
        Self {
            particles: Arc::from(vec![value]),
            mean: value,
        }
    }

    /// Build from raw particles. Returns `None` when `particles` is empty.
    pub fn from_particles(particles: Vec<f64>) -> Option<Self> {
        if particles.is_empty() {
            return None;
        }
        let mean = particles.iter().mean();
        Some(Self {
            particles: Arc::from(particles),
            mean,
        })
    }

    pub fn particles(&self) -> &[f64] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn is_point(&self) -> bool {
        self.particles.len() == 1
    }

    fn is_zero(&self) -> bool {
        self.is_point() && self.particles[0] == 0.0 && self.mean == 0.0
    }

    fn combine(&self, rhs: &Self, op: Op) -> Self {
        if op == Op::Add {
            if self.is_zero() {
                return rhs.clone();
            }
            if rhs.is_zero() {
                return self.clone();
            }
        }

        let mean = op.apply(self.mean, rhs.mean);
        let particles: Vec<f64> = match (self.is_point(), rhs.is_point()) {
            (true, true) => vec![op.apply(self.particles[0], rhs.particles[0])],
            (true, false) => {
                let x = self.particles[0];
                rhs.particles.iter().map(|&y| op.apply(x, y)).collect()
            }
            (false, true) => {
                let y = rhs.particles[0];
                self.particles.iter().map(|&x| op.apply(x, y)).collect()
            }
            (false, false) => {
                let n = self.particle_count().max(rhs.particle_count());
                let mut rng = StdRng::seed_from_u64(pairing_seed(op, self, rhs));
                let left = index_stream(self.particle_count(), n, &mut rng);
                let right = index_stream(rhs.particle_count(), n, &mut rng);
                left.iter()
                    .zip(&right)
                    .map(|(&i, &j)| op.apply(self.particles[i], rhs.particles[j]))
                    .collect()
            }
        };
        Self::mean_matched(particles, mean)
    }

    fn mean_matched(mut particles: Vec<f64>, mean: f64) -> Self {
        let shift = mean - particles.iter().mean();
        if shift != 0.0 && shift.is_finite() {
            for p in &mut particles {
                *p += shift;
            }
        }
        Self {
            particles: Arc::from(particles),
            mean,
        }
    }
}

/// Seed for pairing `lhs op rhs`, taken from the first eight bytes of a SHA-256 digest.
fn pairing_seed(op: Op, lhs: &Empirical, rhs: &Empirical) -> u64 {
    let mut h = Sha256::new();
    h.update([op.tag()]);
    for side in [lhs, rhs] {
        h.update((side.particle_count() as u64).to_le_bytes());
        for p in side.particles.iter() {
            h.update(p.to_le_bytes());
        }
    }
    let digest: [u8; 32] = h.finalize().into();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed)
}

/// `n` indices into a cloud of `len` particles: shuffled permutations, tiled and truncated.
fn index_stream(len: usize, n: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut block: Vec<usize> = (0..len).collect();
    let mut stream = Vec::with_capacity(n);
    while stream.len() < n {
        block.shuffle(rng);
        let take = (n - stream.len()).min(len);
        stream.extend_from_slice(&block[..take]);
    }
    stream
}

impl Add for Empirical {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(&rhs, Op::Add)
    }
}

impl Mul for Empirical {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.combine(&rhs, Op::Mul)
    }
}

impl Numeric for Empirical {
    fn zero() -> Self {
        Self::point(0.0)
    }

    fn representative(&self) -> f64 {
        self.mean
    }
}

impl FromSamples for Empirical {
    fn from_samples(samples: &SampleSet) -> Self {
        let mean = samples.as_slice().iter().mean();
        Self {
            particles: Arc::from(samples.as_slice()),
            mean,
        }
    }
}

impl Describe for Empirical {
    fn summary(&self) -> Summary {
        if self.is_point() {
            return Summary::point(self.mean);
        }
        let mut data = Data::new(self.particles.to_vec());
        Summary {
            mean: self.mean,
            std_dev: self.particles.iter().population_std_dev(),
            lower: data.percentile(LOWER_PERCENTILE),
            upper: data.percentile(UPPER_PERCENTILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud(values: &[f64]) -> Empirical {
        Empirical::from_samples(&SampleSet::new(values.to_vec()).unwrap())
    }

    fn ramp(n: usize, offset: f64) -> Empirical {
        let v: Vec<f64> = (0..n).map(|i| offset + i as f64 * 0.01).collect();
        cloud(&v)
    }

    fn population_variance(e: &Empirical) -> f64 {
        e.particles().iter().population_variance()
    }

    #[test]
    fn test_single_sample_is_exact_point() {
        let e = cloud(&[0.2342323341]);
        assert!(e.is_point());
        assert_eq!(e.representative(), 0.2342323341);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = cloud(&[1.0, 2.0, 4.0]);
        let b = cloud(&[1.0, 2.0, 4.0]);
        assert_eq!(a, b);
        assert_eq!(a.particles(), &[1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_zero_plus_x_is_x() {
        let x = ramp(50, 3.0);
        let left = Empirical::zero() + x.clone();
        let right = x.clone() + Empirical::zero();
        assert_eq!(left, x);
        assert_eq!(right, x);
    }

    #[test]
    fn test_point_arithmetic_matches_scalar() {
        let a = Empirical::point(1.5);
        let b = Empirical::point(-4.0);
        let sum = a.clone() + b.clone();
        let prod = a * b;
        assert_eq!(sum.representative(), 1.5 + -4.0);
        assert_eq!(prod.representative(), 1.5 * -4.0);
        assert_eq!(prod.particles(), &[-6.0]);
    }

    #[test]
    fn test_point_broadcast_keeps_order() {
        let x = cloud(&[1.0, 2.0, 3.0]);
        let scaled = Empirical::point(2.0) * x;
        assert_eq!(scaled.particles(), &[2.0, 4.0, 6.0]);
        assert_eq!(scaled.representative(), 4.0);
    }

    #[test]
    fn test_add_representative_is_sum_of_means() {
        let x = ramp(200, 1.0);
        let y = ramp(120, -0.5);
        let z = x.clone() + y.clone();
        assert!((z.representative() - (x.mean() + y.mean())).abs() < 1e-12);
        let cloud_mean = z.particles().iter().mean();
        assert!((cloud_mean - z.representative()).abs() < 1e-9);
    }

    #[test]
    fn test_mul_representative_is_product_of_means() {
        let x = ramp(300, 2.0);
        let y = ramp(300, 5.0);
        let z = x.clone() * y.clone();
        assert!((z.representative() - x.mean() * y.mean()).abs() < 1e-12);
        let cloud_mean = z.particles().iter().mean();
        assert!((cloud_mean - z.representative()).abs() < 1e-9);
    }

    #[test]
    fn test_result_particle_count_is_larger_operand() {
        let z = ramp(40, 0.0) + ramp(7, 1.0);
        assert_eq!(z.particle_count(), 40);
    }

    #[test]
    fn test_shorter_cloud_used_evenly() {
        let mut rng = StdRng::seed_from_u64(7);
        let stream = index_stream(3, 10, &mut rng);
        assert_eq!(stream.len(), 10);
        for idx in 0..3 {
            let uses = stream.iter().filter(|&&i| i == idx).count();
            assert!((3..=4).contains(&uses), "index {idx} used {uses} times");
        }
    }

    #[test]
    fn test_longer_cloud_is_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut stream = index_stream(25, 25, &mut rng);
        stream.sort_unstable();
        assert_eq!(stream, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_arithmetic_is_reproducible() {
        let run = || {
            let x = ramp(64, 1.0);
            let y = ramp(64, 2.0);
            (x.clone() * y.clone()) + (y * x)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_distinct_operations_pair_differently() {
        let x = ramp(64, 1.0);
        let y = ramp(64, 2.0);
        assert_ne!(pairing_seed(Op::Add, &x, &y), pairing_seed(Op::Mul, &x, &y));
        assert_ne!(pairing_seed(Op::Add, &x, &y), pairing_seed(Op::Add, &y, &x));
    }

    #[test]
    fn test_independent_sum_adds_variances() {
        let x = ramp(1000, 0.0);
        let y = ramp(1000, 10.0);
        let z = x.clone() + y.clone();
        let expected = population_variance(&x) + population_variance(&y);
        let got = population_variance(&z);
        assert!(
            (got - expected).abs() / expected < 0.2,
            "variance {got} vs expected {expected}"
        );
    }

    #[test]
    fn test_summary_of_point() {
        let s = Empirical::point(4.0).summary();
        assert_eq!(s, Summary::point(4.0));
    }

    #[test]
    fn test_summary_interval_brackets_mean() {
        let s = ramp(101, 0.0).summary();
        assert!(s.lower < s.mean && s.mean < s.upper);
        assert!(s.std_dev > 0.0);
        assert!((s.mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_particles_rejects_empty() {
        assert!(Empirical::from_particles(Vec::new()).is_none());
        let e = Empirical::from_particles(vec![2.0, 4.0]).unwrap();
        assert_eq!(e.mean(), 3.0);
    }
}
