// src/simulation/distribution.rs
use crate::core::{NORM_TOLERANCE, Outcome, SimError};
use crate::simulation::engine::select_cumulative;
use crate::validation::check_distribution;
use std::fmt;
use std::marker::PhantomData;

/// Probabilities of a complete set of outcomes, in canonical order.
///
/// Built once from closed-form expressions and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDistribution<O: Outcome> {
    probabilities: Vec<f64>,
    _outcome: PhantomData<O>,
}

impl<O: Outcome> OutcomeDistribution<O> {
    /// Builds a distribution from one probability per outcome in `O::ALL` order.
    ///
    /// Values within `NORM_TOLERANCE` outside [0, 1] (rounding residue of
    /// closed-form expressions) are clamped back into range.
    ///
    /// # Errors
    /// * `SimError::DimensionMismatch` if the length differs from `O::ALL.len()`.
    /// * `SimError::InvalidProbability` for a value outside the tolerance band
    ///   or a total mass that is not 1 within `NORM_TOLERANCE`.
    pub fn new(probabilities: Vec<f64>) -> Result<Self, SimError> {
        if probabilities.len() != O::ALL.len() {
            return Err(SimError::DimensionMismatch { expected: O::ALL.len(), actual: probabilities.len() });
        }
        // Out-of-band values pass through unchanged and fail the check below
        let clamped: Vec<f64> = probabilities
            .into_iter()
            .map(|p| if (-NORM_TOLERANCE..=1.0 + NORM_TOLERANCE).contains(&p) { p.clamp(0.0, 1.0) } else { p })
            .collect();
        check_distribution(&clamped, Some(NORM_TOLERANCE))?;
        Ok(Self {
            probabilities: clamped,
            _outcome: PhantomData,
        })
    }

    /// Probability of `outcome`.
    pub fn probability(&self, outcome: O) -> f64 {
        self.probabilities[outcome.index()]
    }

    /// All probabilities in canonical order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// `(outcome, probability)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (O, f64)> + '_ {
        O::ALL.iter().copied().zip(self.probabilities.iter().copied())
    }

    /// Expected value of observable `k`.
    pub fn expectation(&self, k: usize) -> f64 {
        self.iter().map(|(o, p)| p * f64::from(o.values()[k])).sum()
    }

    /// Expected value of the product of all observables.
    pub fn product_expectation(&self) -> f64 {
        self.iter().map(|(o, p)| p * o.values().iter().map(|v| f64::from(*v)).product::<f64>()).sum()
    }

    /// Expected value of the sum of all observables.
    pub fn sum_expectation(&self) -> f64 {
        self.iter().map(|(o, p)| p * o.values().iter().map(|v| f64::from(*v)).sum::<f64>()).sum()
    }

    /// Maps a uniform value `r` in [0, 1) to an outcome.
    pub fn select(&self, r: f64) -> O {
        O::ALL[select_cumulative(&self.probabilities, r)]
    }
}

impl<O: Outcome> fmt::Display for OutcomeDistribution<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (o, p)) in self.iter().enumerate() {
            write!(f, "{}{}: {:.4}", if i > 0 { ", " } else { "" }, o.label(), p)?;
        }
        write!(f, "}}")
    }
}
