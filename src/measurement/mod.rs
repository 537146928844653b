// src/measurement/mod.rs

//! Probability-from-state derivation for spin measurements.
//!
//! Two settings are modelled:
//! - a Stern-Gerlach apparatus measuring one spin-1/2 along z
//!   ([`SpinMeasurement`]);
//! - a pair of detectors, A measuring the first qubit along z and B the
//!   second qubit in a basis rotated by an angle α
//!   ([`TwoQubitMeasurement`]).
//!
//! The rotated basis is `|+α> = (cos α/2, sin α/2)`,
//! `|-α> = (sin α/2, -cos α/2)`. Both vectors are real, so the overlap of a
//! pair `(c0, c1)` with them is `c0 cos + c1 sin` and `c0 sin - c1 cos`.

pub mod evolution;

pub use evolution::{EvolutionPoint, ExchangeEvolution};

use crate::core::{AmplitudeState, JointSpin, Outcome, SimError, Spin};
use crate::simulation::{OutcomeDistribution, TrialModel};
use crate::validation::check_normalization;
use num_complex::Complex;
use rand::Rng;
use serde::Serialize;

/// Overlaps of the pair `(c0, c1)` with `|+α>` and `|-α>`.
pub fn rotated_amplitudes(c0: Complex<f64>, c1: Complex<f64>, alpha: f64) -> (Complex<f64>, Complex<f64>) {
    let (sin, cos) = (alpha / 2.0).sin_cos();
    (c0 * cos + c1 * sin, c0 * sin - c1 * cos)
}

/// Probabilities `[P(+1), P(-1)]` of measuring the second qubit of a
/// two-qubit state in the basis rotated by `alpha`.
///
/// The null vector left by an impossible collapse gives `[0, 0]`.
pub fn rotated_probabilities(state: &AmplitudeState, alpha: f64) -> Result<[f64; 2], SimError> {
    state.expect_dim(4)?;
    let c = state.vector();
    let (plus_a, minus_a) = rotated_amplitudes(c[0], c[1], alpha);
    let (plus_b, minus_b) = rotated_amplitudes(c[2], c[3], alpha);
    Ok([plus_a.norm_sqr() + plus_b.norm_sqr(), minus_a.norm_sqr() + minus_b.norm_sqr()])
}

/// Probabilities `[P(+1), P(-1)]` of measuring the first qubit along z.
pub fn first_qubit_probabilities(state: &AmplitudeState) -> Result<[f64; 2], SimError> {
    state.expect_dim(4)?;
    let p = state.probabilities();
    Ok([p[0] + p[1], p[2] + p[3]])
}

/// Collapses a two-qubit state onto the subspace where the first qubit gave `outcome`.
///
/// Returns a new renormalized state, or the zero vector if that subspace
/// carries no probability.
pub fn collapse_first_qubit(state: &AmplitudeState, outcome: Spin) -> Result<AmplitudeState, SimError> {
    state.expect_dim(4)?;
    Ok(match outcome {
        Spin::Up => state.project(|i| i < 2),
        Spin::Down => state.project(|i| i >= 2),
    })
}

/// Concurrence `2|c00 c11 - c01 c10|` of a pure two-qubit state.
pub fn concurrence(state: &AmplitudeState) -> Result<f64, SimError> {
    state.expect_dim(4)?;
    let c = state.vector();
    Ok((2.0 * (c[0] * c[3] - c[1] * c[2]).norm()).min(1.0))
}

/// Theoretical expectation values for the two-detector experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Expectations {
    /// E[A]
    pub first: f64,
    /// E[B]
    pub second: f64,
    /// E[A + B]
    pub sum: f64,
    /// E[A·B]
    pub product: f64,
}

/// A single spin-1/2 sent through a z-oriented Stern-Gerlach magnet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinMeasurement {
    state: AmplitudeState,
    distribution: OutcomeDistribution<Spin>,
}

impl SpinMeasurement {
    /// # Errors
    /// * `SimError::DimensionMismatch` unless `state` has two amplitudes.
    /// * `SimError::DegenerateState` if `state` is not normalized.
    pub fn new(state: AmplitudeState) -> Result<Self, SimError> {
        state.expect_dim(2)?;
        check_normalization(&state, None)?;
        let distribution = OutcomeDistribution::new(state.probabilities())?;
        Ok(Self { state, distribution })
    }

    /// Normalizes `c_up |z,+> + c_down |z,->` and prepares the measurement.
    pub fn from_amplitudes(c_up: Complex<f64>, c_down: Complex<f64>) -> Result<Self, SimError> {
        Self::new(AmplitudeState::normalized(vec![c_up, c_down])?)
    }

    pub fn state(&self) -> &AmplitudeState {
        &self.state
    }

    /// P(z,+) or P(z,-).
    pub fn probability(&self, outcome: Spin) -> f64 {
        self.distribution.probability(outcome)
    }

    /// ⟨σz⟩ = P(up) - P(down).
    pub fn expectation(&self) -> f64 {
        self.distribution.expectation(0)
    }

    /// Δσz = sqrt(1 - ⟨σz⟩²), since σz² is the identity.
    pub fn std_dev(&self) -> f64 {
        let mean = self.expectation();
        (1.0 - mean * mean).max(0.0).sqrt()
    }
}

impl TrialModel for SpinMeasurement {
    type Outcome = Spin;

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Spin {
        self.distribution.draw(rng)
    }

    fn theoretical(&self) -> Result<OutcomeDistribution<Spin>, SimError> {
        Ok(self.distribution.clone())
    }
}

/// Detector A measures the first qubit along z, then detector B measures
/// the second qubit in the basis rotated by `alpha`.
///
/// B's statistics are conditioned on A's result: each trial first draws A
/// from the marginal, collapses the state onto the matching subspace and
/// only then draws B from the collapsed state.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoQubitMeasurement {
    state: AmplitudeState,
    alpha: f64,
    first: OutcomeDistribution<Spin>,
    /// `[P(B=+1), P(B=-1)]` after collapsing on A = +1 and on A = -1.
    conditional: [[f64; 2]; 2],
}

impl TwoQubitMeasurement {
    /// `alpha` is the rotation of detector B in radians.
    ///
    /// # Errors
    /// * `SimError::DimensionMismatch` unless `state` has four amplitudes.
    /// * `SimError::DegenerateState` if `state` is not normalized.
    pub fn new(state: AmplitudeState, alpha: f64) -> Result<Self, SimError> {
        state.expect_dim(4)?;
        check_normalization(&state, None)?;
        let first = OutcomeDistribution::new(first_qubit_probabilities(&state)?.to_vec())?;
        let conditional = [
            rotated_probabilities(&collapse_first_qubit(&state, Spin::Up)?, alpha)?,
            rotated_probabilities(&collapse_first_qubit(&state, Spin::Down)?, alpha)?,
        ];
        Ok(Self { state, alpha, first, conditional })
    }

    /// Same as [`TwoQubitMeasurement::new`] with the angle in degrees.
    pub fn from_degrees(state: AmplitudeState, degrees: f64) -> Result<Self, SimError> {
        Self::new(state, degrees.to_radians())
    }

    pub fn state(&self) -> &AmplitudeState {
        &self.state
    }

    /// Rotation of detector B, in radians.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Marginal distribution of detector A.
    pub fn first_marginal(&self) -> &OutcomeDistribution<Spin> {
        &self.first
    }

    /// `[P(B=+1 | A), P(B=-1 | A)]`. Both are zero for a branch A never takes.
    pub fn conditional_second(&self, first: Spin) -> [f64; 2] {
        self.conditional[first.index()]
    }

    /// Closed-form joint distribution of (A, B).
    pub fn joint(&self) -> Result<OutcomeDistribution<JointSpin>, SimError> {
        let c = self.state.vector();
        let (pp, pm) = rotated_amplitudes(c[0], c[1], self.alpha);
        let (mp, mm) = rotated_amplitudes(c[2], c[3], self.alpha);
        OutcomeDistribution::new(vec![pp.norm_sqr(), pm.norm_sqr(), mp.norm_sqr(), mm.norm_sqr()])
    }

    /// Theoretical E[A], E[B], E[A+B] and E[A·B].
    pub fn expectations(&self) -> Result<Expectations, SimError> {
        let joint = self.joint()?;
        Ok(Expectations {
            first: joint.expectation(0),
            second: joint.expectation(1),
            sum: joint.sum_expectation(),
            product: joint.product_expectation(),
        })
    }

    /// Entanglement of the prepared state.
    pub fn concurrence(&self) -> Result<f64, SimError> {
        concurrence(&self.state)
    }
}

impl TrialModel for TwoQubitMeasurement {
    type Outcome = JointSpin;

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> JointSpin {
        let a = self.first.select(rng.random::<f64>());
        let [p_plus, _] = self.conditional_second(a);
        // A branch with zero mass is never selected above, so p_plus is a
        // proper conditional probability here.
        let b = if rng.random::<f64>() < p_plus { Spin::Up } else { Spin::Down };
        JointSpin::from_pair(a, b)
    }

    fn theoretical(&self) -> Result<OutcomeDistribution<JointSpin>, SimError> {
        self.joint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

    const TEST_TOLERANCE: f64 = 1e-9;

    fn bell_phi_plus() -> AmplitudeState {
        AmplitudeState::from_real(&[1.0, 0.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn test_spin_probabilities_and_moments() -> Result<(), SimError> {
        let m = SpinMeasurement::from_amplitudes(Complex::new(1.0, 0.0), Complex::new(0.0, 1.0))?;
        assert!((m.probability(Spin::Up) - 0.5).abs() < TEST_TOLERANCE);
        assert!(m.expectation().abs() < TEST_TOLERANCE);
        assert!((m.std_dev() - 1.0).abs() < TEST_TOLERANCE);

        let m = SpinMeasurement::from_amplitudes(Complex::new(0.6, 0.0), Complex::new(0.0, -0.8))?;
        assert!((m.probability(Spin::Down) - 0.64).abs() < TEST_TOLERANCE);
        assert!((m.expectation() + 0.28).abs() < TEST_TOLERANCE);
        assert!((m.std_dev() - (1.0f64 - 0.28 * 0.28).sqrt()).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_spin_rejects_wrong_dimension() -> Result<(), SimError> {
        let result = SpinMeasurement::new(bell_phi_plus());
        assert!(matches!(result, Err(SimError::DimensionMismatch { expected: 2, actual: 4 })));
        Ok(())
    }

    #[test]
    fn test_alpha_zero_collapse_matches_reduced_state() -> Result<(), SimError> {
        // Second qubit probabilities after A=+1 at alpha=0 are those of the
        // normalized pair (c0, c1)
        let state = AmplitudeState::from_pairs(&[(0.3, 0.1), (-0.2, 0.5), (0.7, 0.0), (0.1, -0.3)])?;
        let m = TwoQubitMeasurement::new(state.clone(), 0.0)?;
        let [p_plus, p_minus] = m.conditional_second(Spin::Up);

        let reduced = AmplitudeState::normalized(state.vector()[..2].to_vec())?;
        let single = SpinMeasurement::new(reduced)?;
        assert!((p_plus - single.probability(Spin::Up)).abs() < TEST_TOLERANCE);
        assert!((p_minus - single.probability(Spin::Down)).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_joint_equals_marginal_times_conditional() -> Result<(), SimError> {
        let state = AmplitudeState::from_pairs(&[(0.3, 0.1), (-0.2, 0.5), (0.7, 0.0), (0.1, -0.3)])?;
        for alpha in [0.0, FRAC_PI_4, FRAC_PI_2, 2.0] {
            let m = TwoQubitMeasurement::new(state.clone(), alpha)?;
            let joint = m.joint()?;
            for &o in JointSpin::ALL {
                let expected = m.first_marginal().probability(o.first()) * m.conditional_second(o.first())[o.second().index()];
                assert!((joint.probability(o) - expected).abs() < TEST_TOLERANCE, "alpha={} outcome={}", alpha, o);
            }
        }
        Ok(())
    }

    #[test]
    fn test_bell_state_correlations() -> Result<(), SimError> {
        // |Φ+> measured with B rotated by alpha: E[A·B] = cos(alpha)
        for alpha in [0.0, FRAC_PI_4, FRAC_PI_2, 1.3] {
            let m = TwoQubitMeasurement::new(bell_phi_plus(), alpha)?;
            let e = m.expectations()?;
            assert!((e.product - alpha.cos()).abs() < TEST_TOLERANCE);
            assert!(e.first.abs() < TEST_TOLERANCE);
            assert!(e.second.abs() < TEST_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn test_product_state_null_branch() -> Result<(), SimError> {
        let m = TwoQubitMeasurement::new(AmplitudeState::basis(4, 0)?, FRAC_PI_4)?;
        assert_eq!(m.first_marginal().probability(Spin::Down), 0.0);
        assert_eq!(m.conditional_second(Spin::Down), [0.0, 0.0]);
        let [p_plus, _] = m.conditional_second(Spin::Up);
        assert!((p_plus - (FRAC_PI_4 / 2.0).cos().powi(2)).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_concurrence_limits() -> Result<(), SimError> {
        assert!((concurrence(&bell_phi_plus())? - 1.0).abs() < TEST_TOLERANCE);
        assert!(concurrence(&AmplitudeState::basis(4, 2)?)?.abs() < TEST_TOLERANCE);
        // |+>|+> is a product state
        let plus_plus = AmplitudeState::from_real(&[0.5, 0.5, 0.5, 0.5])?;
        assert!(concurrence(&plus_plus)?.abs() < TEST_TOLERANCE);
        let partial = AmplitudeState::from_real(&[FRAC_1_SQRT_2, 0.0, 0.0, 0.0])?;
        assert!(concurrence(&partial)?.abs() < TEST_TOLERANCE);
        Ok(())
    }
}
