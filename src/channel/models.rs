// src/channel/models.rs

//! Monte Carlo models of symbols crossing a noisy binary channel.

use super::{PrefixCode, corruption_probability, detection_ratio, odd_flip_probability};
use crate::core::{Delivery, ParityOutcome, SimError};
use crate::simulation::engine::select_cumulative;
use crate::simulation::{OutcomeDistribution, Sampler, TrialModel};
use crate::validation::{check_positive_trials, check_probability};
use log::debug;
use rand::Rng;
use serde::Serialize;

/// Counts how many of `bits` independent bits flip with probability `epsilon`.
fn count_flips<R: Rng + ?Sized>(bits: u32, epsilon: f64, rng: &mut R) -> u32 {
    (0..bits).filter(|_| rng.random::<f64>() < epsilon).count() as u32
}

/// An `bits`-bit symbol (data plus one parity bit) sent over a binary
/// symmetric channel with crossover `epsilon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParityCodedSymbol {
    bits: u32,
    epsilon: f64,
}

impl ParityCodedSymbol {
    /// # Errors
    /// * `SimError::InvalidProbability` if `epsilon` is outside [0, 1].
    pub fn new(bits: u32, epsilon: f64) -> Result<Self, SimError> {
        Ok(Self { bits, epsilon: check_probability("epsilon", epsilon)? })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl TrialModel for ParityCodedSymbol {
    type Outcome = ParityOutcome;

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ParityOutcome {
        ParityOutcome::from_flips(count_flips(self.bits, self.epsilon, rng))
    }

    fn theoretical(&self) -> Result<OutcomeDistribution<ParityOutcome>, SimError> {
        let corrupted = corruption_probability(self.bits, self.epsilon);
        let detected = odd_flip_probability(self.bits, self.epsilon);
        OutcomeDistribution::new(vec![1.0 - corrupted, detected, (corrupted - detected).max(0.0)])
    }
}

/// A symbol drawn from a [`PrefixCode`] source and sent over an asymmetric
/// channel: each `0` flips with `epsilon0`, each `1` with `epsilon1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixCodeSymbol {
    code: PrefixCode,
    source: Vec<f64>,
    epsilon0: f64,
    epsilon1: f64,
}

impl PrefixCodeSymbol {
    pub fn new(code: PrefixCode, epsilon0: f64, epsilon1: f64) -> Result<Self, SimError> {
        let source = code.probabilities();
        Ok(Self {
            code,
            source,
            epsilon0: check_probability("epsilon0", epsilon0)?,
            epsilon1: check_probability("epsilon1", epsilon1)?,
        })
    }

    pub fn code(&self) -> &PrefixCode {
        &self.code
    }
}

impl TrialModel for PrefixCodeSymbol {
    type Outcome = Delivery;

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Delivery {
        let symbol = self.code.codewords()[select_cumulative(&self.source, rng.random::<f64>())];
        let flips = count_flips(symbol.ones, self.epsilon1, rng) + count_flips(symbol.zeros, self.epsilon0, rng);
        if flips > 0 { Delivery::Corrupted } else { Delivery::Intact }
    }

    fn theoretical(&self) -> Result<OutcomeDistribution<Delivery>, SimError> {
        let corrupted = self.code.corruption_probability(self.epsilon0, self.epsilon1);
        OutcomeDistribution::new(vec![1.0 - corrupted, corrupted])
    }
}

/// Plain 4-bit symbols against 5-bit parity-coded symbols on the same channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParityCheckReport {
    pub epsilon: f64,
    pub trials: u64,
    /// Plain 4-bit symbols with at least one flipped bit, in percent.
    pub plain_corrupted_percent: f64,
    pub theoretical_plain_corrupted_percent: f64,
    /// 5-bit symbols with at least one flipped bit, in percent.
    pub coded_corrupted_percent: f64,
    pub theoretical_coded_corrupted_percent: f64,
    /// Share of corrupted 5-bit symbols caught by the parity bit, in percent.
    /// `None` when no symbol was corrupted during the run.
    pub detected_percent_of_corrupted: Option<f64>,
    pub theoretical_detected_percent: Option<f64>,
}

/// Data bits per symbol in the parity-check experiment.
pub const DATA_BITS: u32 = 4;

/// Runs `trials` plain 4-bit symbols and `trials` parity-coded 5-bit symbols.
///
/// # Errors
/// * `SimError::InvalidSampleSize` if `trials` is not positive.
/// * `SimError::InvalidProbability` if `epsilon` is outside [0, 1].
pub fn simulate_parity_check<R: Rng + ?Sized>(epsilon: f64, trials: i64, rng: &mut R) -> Result<ParityCheckReport, SimError> {
    let n = check_positive_trials(trials)?;
    let plain = ParityCodedSymbol::new(DATA_BITS, epsilon)?;
    let coded = ParityCodedSymbol::new(DATA_BITS + 1, epsilon)?;
    let sampler = Sampler::new(n);

    let plain_report = sampler.run(&plain, rng);
    let coded_report = sampler.run(&coded, rng);

    let coded_tally = coded_report.tally();
    let corrupted = coded_tally.count(ParityOutcome::Detected) + coded_tally.count(ParityOutcome::Undetected);
    let detected_percent_of_corrupted = if corrupted == 0 {
        debug!("No corrupted 5-bit symbols at epsilon={}; detection ratio undefined", epsilon);
        None
    } else {
        Some(coded_tally.count(ParityOutcome::Detected) as f64 / corrupted as f64 * 100.0)
    };

    Ok(ParityCheckReport {
        epsilon,
        trials: n,
        plain_corrupted_percent: plain_report.mean(0) * 100.0,
        theoretical_plain_corrupted_percent: corruption_probability(DATA_BITS, epsilon) * 100.0,
        coded_corrupted_percent: coded_report.mean(0) * 100.0,
        theoretical_coded_corrupted_percent: corruption_probability(DATA_BITS + 1, epsilon) * 100.0,
        detected_percent_of_corrupted,
        theoretical_detected_percent: detection_ratio(DATA_BITS + 1, epsilon).map(|r| r * 100.0),
    })
}

/// Corruption rate of the prefix-coded source, simulated and exact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixCodeReport {
    pub epsilon0: f64,
    pub epsilon1: f64,
    pub trials: u64,
    pub corrupted_percent: f64,
    pub theoretical_corrupted_percent: f64,
}

/// Sends `trials` symbols of the truncated unary code over the channel.
///
/// # Errors
/// * `SimError::InvalidSampleSize` if `trials` is not positive.
/// * `SimError::InvalidProbability` for crossovers outside [0, 1].
pub fn simulate_prefix_code<R: Rng + ?Sized>(
    epsilon0: f64,
    epsilon1: f64,
    trials: i64,
    rng: &mut R,
) -> Result<PrefixCodeReport, SimError> {
    let n = check_positive_trials(trials)?;
    let model = PrefixCodeSymbol::new(PrefixCode::truncated_unary(), epsilon0, epsilon1)?;
    let report = Sampler::new(n).run(&model, rng);
    Ok(PrefixCodeReport {
        epsilon0,
        epsilon1,
        trials: n,
        corrupted_percent: report.tally().percentage(Delivery::Corrupted)?,
        theoretical_corrupted_percent: model.theoretical()?.probability(Delivery::Corrupted) * 100.0,
    })
}
