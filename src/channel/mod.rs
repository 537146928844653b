// src/channel/mod.rs

//! Binary channel error and information measures.
//!
//! A binary channel is described by two crossover probabilities:
//! `epsilon0 = P(Y=1 | X=0)` and `epsilon1 = P(Y=0 | X=1)`. The prior
//! `p = P(X=0)` describes the source. The symmetric channel has
//! `epsilon0 = epsilon1`; the Z-channel never corrupts a `0`.
//!
//! Functions taking raw `f64` probabilities expect values in [0, 1];
//! [`BinaryChannel`] validates its parameters on construction.

pub mod capacity;
pub mod models;
pub mod sweep;

pub use capacity::{Capacity, bisect, capacity, mutual_information_derivative};
pub use models::{ParityCheckReport, ParityCodedSymbol, PrefixCodeReport, PrefixCodeSymbol, simulate_parity_check, simulate_prefix_code};

use crate::core::{CLIP_EPSILON, SimError};
use crate::validation::check_probability;

/// Shannon entropy of a Bernoulli(`q`) variable, in bits.
///
/// Exactly 0 at `q = 0` and `q = 1` (and for anything outside (0, 1)).
pub fn binary_entropy(q: f64) -> f64 {
    if q <= 0.0 || q >= 1.0 {
        return 0.0;
    }
    -q * q.log2() - (1.0 - q) * (1.0 - q).log2()
}

/// Clamps `q` into `[CLIP_EPSILON, 1 - CLIP_EPSILON]` so its logarithm is finite.
pub fn clip_probability(q: f64) -> f64 {
    q.clamp(CLIP_EPSILON, 1.0 - CLIP_EPSILON)
}

/// `binary_entropy(clip_probability(q))`. Differs from the exact entropy by
/// at most about 3.5e-9 bits, and only within `CLIP_EPSILON` of 0 or 1.
pub fn clipped_entropy(q: f64) -> f64 {
    binary_entropy(clip_probability(q))
}

/// P(Y = 0) for prior `p = P(X=0)`.
pub fn output_zero_probability(prior: f64, epsilon0: f64, epsilon1: f64) -> f64 {
    prior * (1.0 - epsilon0) + (1.0 - prior) * epsilon1
}

/// I(X;Y) = H(Y) - H(Y|X) for a binary channel, in bits.
///
/// Every probability is clipped with [`clip_probability`] before a
/// logarithm is taken, so the result is finite for all inputs in [0, 1].
pub fn mutual_information(prior: f64, epsilon0: f64, epsilon1: f64) -> f64 {
    let (p, e0, e1) = (clip_probability(prior), clip_probability(epsilon0), clip_probability(epsilon1));
    let h_y = clipped_entropy(output_zero_probability(p, e0, e1));
    let h_y_given_x = p * clipped_entropy(e0) + (1.0 - p) * clipped_entropy(e1);
    h_y - h_y_given_x
}

/// Mutual information of the binary symmetric channel with crossover `epsilon`.
pub fn symmetric_mutual_information(prior: f64, epsilon: f64) -> f64 {
    mutual_information(prior, epsilon, epsilon)
}

/// Mutual information of the Z-channel: `0` always arrives intact, `1` flips with `epsilon1`.
pub fn z_channel_mutual_information(prior: f64, epsilon1: f64) -> f64 {
    mutual_information(prior, 0.0, epsilon1)
}

/// Probability that at least one of `bits` independent bits flips.
pub fn corruption_probability(bits: u32, epsilon: f64) -> f64 {
    1.0 - (1.0 - epsilon).powf(f64::from(bits))
}

/// Probability that an odd number of `bits` independent bits flip, which
/// is exactly when a single parity bit detects the error.
pub fn odd_flip_probability(bits: u32, epsilon: f64) -> f64 {
    (1.0 - (1.0 - 2.0 * epsilon).powf(f64::from(bits))) / 2.0
}

/// Fraction of corrupted `bits`-bit parity-coded symbols that the parity
/// check catches. `None` when no symbol can be corrupted.
pub fn detection_ratio(bits: u32, epsilon: f64) -> Option<f64> {
    let corrupted = corruption_probability(bits, epsilon);
    if corrupted <= 0.0 {
        return None;
    }
    Some(odd_flip_probability(bits, epsilon) / corrupted)
}

/// A binary channel with validated crossover probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryChannel {
    epsilon0: f64,
    epsilon1: f64,
}

impl BinaryChannel {
    /// # Errors
    /// * `SimError::InvalidProbability` if either crossover lies outside [0, 1].
    pub fn new(epsilon0: f64, epsilon1: f64) -> Result<Self, SimError> {
        Ok(Self {
            epsilon0: check_probability("epsilon0", epsilon0)?,
            epsilon1: check_probability("epsilon1", epsilon1)?,
        })
    }

    pub fn symmetric(epsilon: f64) -> Result<Self, SimError> {
        Self::new(epsilon, epsilon)
    }

    pub fn z_channel(epsilon1: f64) -> Result<Self, SimError> {
        Self::new(0.0, epsilon1)
    }

    pub fn epsilon0(&self) -> f64 {
        self.epsilon0
    }

    pub fn epsilon1(&self) -> f64 {
        self.epsilon1
    }

    /// I(X;Y) for the source prior `p = P(X=0)`.
    pub fn mutual_information(&self, prior: f64) -> Result<f64, SimError> {
        let prior = check_probability("prior", prior)?;
        Ok(mutual_information(prior, self.epsilon0, self.epsilon1))
    }

    /// dI/dp at `prior`.
    pub fn mutual_information_derivative(&self, prior: f64) -> Result<f64, SimError> {
        let prior = check_probability("prior", prior)?;
        Ok(mutual_information_derivative(prior, self.epsilon0, self.epsilon1))
    }

    /// Maximum of I(X;Y) over the prior, located by bisection to `tolerance`.
    pub fn capacity(&self, tolerance: f64) -> Result<Capacity, SimError> {
        capacity(self.epsilon0, self.epsilon1, tolerance)
    }
}

/// One codeword of a [`PrefixCode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Codeword {
    pub probability: f64,
    pub ones: u32,
    pub zeros: u32,
}

impl Codeword {
    /// Probability that at least one bit of this codeword flips.
    pub fn corruption_probability(&self, epsilon0: f64, epsilon1: f64) -> f64 {
        1.0 - (1.0 - epsilon0).powf(f64::from(self.zeros)) * (1.0 - epsilon1).powf(f64::from(self.ones))
    }
}

/// Variable-length prefix code over a dyadic source.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixCode {
    codewords: Vec<Codeword>,
}

impl PrefixCode {
    /// Truncated unary code for eight symbols with probabilities
    /// 1/2, 1/4, …, 1/128, 1/128: symbol `k < 7` is `k` ones followed by a
    /// zero (`0`, `10`, `110`, …) and the last symbol is seven ones.
    pub fn truncated_unary() -> Self {
        const SYMBOLS: u32 = 8;
        let codewords = (0..SYMBOLS)
            .map(|k| {
                let last = k == SYMBOLS - 1;
                let exponent = if last { k } else { k + 1 };
                Codeword {
                    probability: 0.5f64.powf(f64::from(exponent)),
                    ones: k,
                    zeros: if last { 0 } else { 1 },
                }
            })
            .collect();
        Self { codewords }
    }

    pub fn codewords(&self) -> &[Codeword] {
        &self.codewords
    }

    /// Source probabilities in codeword order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.codewords.iter().map(|c| c.probability).collect()
    }

    /// Expected codeword length in bits.
    pub fn mean_length(&self) -> f64 {
        self.codewords.iter().map(|c| c.probability * f64::from(c.ones + c.zeros)).sum()
    }

    /// Probability that a transmitted symbol arrives corrupted.
    pub fn corruption_probability(&self, epsilon0: f64, epsilon1: f64) -> f64 {
        self.codewords.iter().map(|c| c.probability * c.corruption_probability(epsilon0, epsilon1)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_entropy_fixed_points() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
        assert!((binary_entropy(0.5) - 1.0).abs() < 1e-9);
        assert!((binary_entropy(0.1) - binary_entropy(0.9)).abs() < 1e-12);
        assert!((binary_entropy(0.11) - 0.4999).abs() < 1e-3);
    }

    #[test]
    fn test_clipping_error_is_bounded() {
        assert!(clipped_entropy(0.0) > 0.0);
        assert!(clipped_entropy(0.0) < 1e-8);
        assert!((clipped_entropy(0.3) - binary_entropy(0.3)).abs() < 1e-15);
    }

    #[test]
    fn test_useless_symmetric_channel() {
        for prior in [0.0, 0.1, 0.37, 0.5, 0.9, 1.0] {
            assert!(symmetric_mutual_information(prior, 0.5).abs() < 1e-3, "prior={}", prior);
        }
    }

    #[test]
    fn test_noiseless_channel_carries_source_entropy() {
        for prior in [0.1, 0.5, 0.8] {
            let info = symmetric_mutual_information(prior, 0.0);
            assert!((info - binary_entropy(prior)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fixed_length_corruption() {
        assert!((corruption_probability(4, 0.1) - 0.3439).abs() < 1e-12);
        assert!((odd_flip_probability(5, 0.1) - 0.33616).abs() < 1e-12);
        assert!((detection_ratio(5, 0.1).unwrap_or(0.0) - 0.820883).abs() < 1e-6);
        assert_eq!(detection_ratio(5, 0.0), None);
    }

    #[test]
    fn test_block_lengths_beyond_i32() {
        // 2^31 bits does not fit an i32 exponent
        let long = 1u32 << 31;
        for bits in [long, u32::MAX] {
            assert_eq!(corruption_probability(bits, 0.1), 1.0);
            assert_eq!(odd_flip_probability(bits, 0.1), 0.5);
            assert_eq!(corruption_probability(bits, 0.0), 0.0);
        }
        // Every bit flips: even blocks keep parity, odd blocks break it
        assert_eq!(odd_flip_probability(long, 1.0), 0.0);
        assert_eq!(odd_flip_probability(u32::MAX, 1.0), 1.0);

        let codeword = Codeword { probability: 1.0, ones: u32::MAX, zeros: long };
        assert_eq!(codeword.corruption_probability(0.0, 0.0), 0.0);
        assert_eq!(codeword.corruption_probability(1e-6, 0.0), 1.0);
    }

    #[test]
    fn test_prefix_code_shape() {
        let code = PrefixCode::truncated_unary();
        assert_eq!(code.codewords().len(), 8);
        assert!((code.probabilities().iter().sum::<f64>() - 1.0).abs() < 1e-15);
        assert_eq!(code.codewords()[0], Codeword { probability: 0.5, ones: 0, zeros: 1 });
        assert_eq!(code.codewords()[7], Codeword { probability: 1.0 / 128.0, ones: 7, zeros: 0 });
        assert!((code.mean_length() - 1.984375).abs() < 1e-12);
    }

    #[test]
    fn test_prefix_code_corruption_with_reliable_zeros() {
        let code = PrefixCode::truncated_unary();
        let p = code.corruption_probability(0.0, 0.1);
        assert!((p - 0.0905695).abs() < 1e-6, "got {}", p);
    }

    #[test]
    fn test_channel_rejects_bad_crossover() {
        assert!(matches!(BinaryChannel::new(0.1, 1.2), Err(SimError::InvalidProbability { .. })));
        assert!(matches!(BinaryChannel::symmetric(-0.1), Err(SimError::InvalidProbability { .. })));
    }
}
