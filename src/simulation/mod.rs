// src/simulation/mod.rs

//! Monte Carlo outcome sampling.
//!
//! A [`TrialModel`] describes how one trial produces an outcome; the
//! [`Sampler`] draws `N` independent trials from it with a caller-supplied
//! random source and aggregates them into a [`SampleReport`].

mod distribution;
pub(crate) mod engine;
mod results;

pub use distribution::OutcomeDistribution;
pub use results::{SampleReport, SampleTally};

use crate::core::{Outcome, SimError};
use crate::validation::check_trials;
use engine::Accumulator;
use log::{debug, trace};
use rand::Rng;

/// A source of independent trials with a known theoretical distribution.
pub trait TrialModel {
    /// Label type of a single trial's result.
    type Outcome: Outcome;

    /// Draws one trial.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Outcome;

    /// Exact probability of each outcome of a single trial.
    fn theoretical(&self) -> Result<OutcomeDistribution<Self::Outcome>, SimError>;
}

impl<O: Outcome> TrialModel for OutcomeDistribution<O> {
    type Outcome = O;

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> O {
        self.select(rng.random::<f64>())
    }

    fn theoretical(&self) -> Result<OutcomeDistribution<O>, SimError> {
        Ok(self.clone())
    }
}

/// Draws a fixed number of independent trials from a [`TrialModel`].
///
/// The sampler holds no generator of its own: the random source is passed
/// to every run, so a seeded `StdRng` makes a run reproducible and parallel
/// runs never share generator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sampler {
    trials: u64,
}

impl Sampler {
    /// Creates a sampler drawing `trials` trials per run.
    pub fn new(trials: u64) -> Self {
        Self { trials }
    }

    /// Creates a sampler from a caller-supplied (possibly negative) trial count.
    ///
    /// # Errors
    /// * `SimError::InvalidSampleSize` if `trials` is negative.
    pub fn with_trials(trials: i64) -> Result<Self, SimError> {
        Ok(Self::new(check_trials(trials)?))
    }

    /// Number of trials per run.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Runs the sampler.
    ///
    /// A run of zero trials returns an empty tally with zero aggregates.
    pub fn run<M, R>(&self, model: &M, rng: &mut R) -> SampleReport<M::Outcome>
    where
        M: TrialModel + ?Sized,
        R: Rng + ?Sized,
    {
        debug!("Sampling {} trials over outcomes {:?}", self.trials, M::Outcome::ALL);
        let mut accumulator = Accumulator::new();
        for _ in 0..self.trials {
            let outcome = model.draw(rng);
            trace!("drew {}", outcome);
            accumulator.record(outcome);
        }
        let report = accumulator.finish();
        debug!("Sampling finished: means {:?}", report.means());
        report
    }
}
