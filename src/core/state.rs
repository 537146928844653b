// src/core/state.rs

use super::constants::sim_constants::ZERO_NORM_SQR;
use super::error::SimError;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// A normalized quantum amplitude vector in a fixed computational basis.
///
/// Length 2 describes a single spin-1/2 (`[c_up, c_down]`), length 4 a
/// pair of qubits in the order `|00>, |01>, |10>, |11>` where the first
/// qubit is the high bit.
///
/// Values of this type are immutable. Collapsing a state produces a new
/// state; the only non-normalized value ever built is the zero vector
/// returned when a collapse lands in a subspace with zero probability
/// (see [`AmplitudeState::is_null`]).
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct AmplitudeState {
    state_vector: Vec<Complex<f64>>,
}

impl AmplitudeState {
    /// Normalizes `raw` so that the sum of squared magnitudes is 1.
    ///
    /// # Errors
    /// * `SimError::DegenerateState` if `raw` is empty, holds a non-finite
    ///   component, or has every component equal to zero.
    ///
    /// Only the direction of `raw` matters: amplitudes of any finite
    /// magnitude normalize to the same state.
    pub fn normalized(raw: Vec<Complex<f64>>) -> Result<Self, SimError> {
        if raw.is_empty() {
            return Err(SimError::DegenerateState {
                message: "Amplitude vector is empty".to_string(),
            });
        }
        if raw.iter().any(|c| !c.re.is_finite() || !c.im.is_finite()) {
            return Err(SimError::DegenerateState {
                message: format!("Amplitude vector has non-finite components: {:?}", raw),
            });
        }
        // Scale by the largest magnitude first so the sum of squares stays in [1, n]
        let scale = raw.iter().map(|c| c.norm()).fold(0.0, f64::max);
        if scale == 0.0 {
            return Err(SimError::DegenerateState {
                message: "All amplitudes are zero".to_string(),
            });
        }
        let scaled: Vec<Complex<f64>> = raw.into_iter().map(|c| c / scale).collect();
        let norm = scaled.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
        Ok(Self {
            state_vector: scaled.into_iter().map(|c| c / norm).collect(),
        })
    }

    /// Builds a state from `(re, im)` pairs and normalizes it.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, SimError> {
        Self::normalized(pairs.iter().map(|&(re, im)| Complex::new(re, im)).collect())
    }

    /// Builds a state from real amplitudes and normalizes it.
    pub fn from_real(amplitudes: &[f64]) -> Result<Self, SimError> {
        Self::normalized(amplitudes.iter().map(|&re| Complex::new(re, 0.0)).collect())
    }

    /// The computational basis state `|index>` of dimension `dim`.
    pub fn basis(dim: usize, index: usize) -> Result<Self, SimError> {
        if index >= dim {
            return Err(SimError::DimensionMismatch { expected: index + 1, actual: dim });
        }
        let mut vector = vec![Complex::zero(); dim];
        vector[index] = Complex::new(1.0, 0.0);
        Ok(Self { state_vector: vector })
    }

    /// Wraps a vector without normalizing it. Callers inside the crate use
    /// this for vectors that are normalized by construction, or for the
    /// zero vector produced by a collapse.
    pub(crate) fn from_raw(state_vector: Vec<Complex<f64>>) -> Self {
        Self { state_vector }
    }

    /// Keeps the amplitudes selected by `keep`, zeroes the rest and
    /// renormalizes.
    ///
    /// Returns the zero vector if the kept subspace carries no probability.
    pub fn project(&self, keep: impl Fn(usize) -> bool) -> Self {
        let projected: Vec<Complex<f64>> = self
            .state_vector
            .iter()
            .enumerate()
            .map(|(i, c)| if keep(i) { *c } else { Complex::zero() })
            .collect();
        let norm_sq: f64 = projected.iter().map(|c| c.norm_sqr()).sum();
        if norm_sq <= ZERO_NORM_SQR {
            return Self::from_raw(vec![Complex::zero(); projected.len()]);
        }
        let norm = norm_sq.sqrt();
        Self::from_raw(projected.into_iter().map(|c| c / norm).collect())
    }

    /// Provides read-only access to the internal state vector.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.state_vector
    }

    /// Number of basis amplitudes.
    pub fn dim(&self) -> usize {
        self.state_vector.len()
    }

    /// Sum of squared magnitudes: 1 for a normalized state, 0 for a null collapse.
    pub fn norm_sqr(&self) -> f64 {
        self.state_vector.iter().map(|c| c.norm_sqr()).sum()
    }

    /// `true` for the zero vector left behind by collapsing onto an empty subspace.
    pub fn is_null(&self) -> bool {
        self.norm_sqr() <= ZERO_NORM_SQR
    }

    /// Squared magnitude of every amplitude, in basis order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state_vector.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Fails with `DimensionMismatch` unless the state has `expected` amplitudes.
    pub fn expect_dim(&self, expected: usize) -> Result<(), SimError> {
        if self.dim() != expected {
            return Err(SimError::DimensionMismatch { expected, actual: self.dim() });
        }
        Ok(())
    }
}

impl fmt::Display for AmplitudeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.state_vector.iter().enumerate() {
            write!(f, "{}{:.3}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
