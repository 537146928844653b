// src/simulation/results.rs
use crate::core::{Outcome, SimError};
use std::fmt;
use std::marker::PhantomData;

/// Per-outcome counts accumulated over a run, stored in canonical outcome order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleTally<O: Outcome> {
    counts: Vec<u64>,
    _outcome: PhantomData<O>,
}

impl<O: Outcome> SampleTally<O> {
    pub(crate) fn new() -> Self {
        Self {
            counts: vec![0; O::ALL.len()],
            _outcome: PhantomData,
        }
    }

    pub(crate) fn increment(&mut self, outcome: O) {
        self.counts[outcome.index()] += 1;
    }

    /// Number of draws that produced `outcome`.
    pub fn count(&self, outcome: O) -> u64 {
        self.counts[outcome.index()]
    }

    /// Sum of all counts, equal to the number of trials.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(outcome, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (O, u64)> + '_ {
        O::ALL.iter().copied().zip(self.counts.iter().copied())
    }

    /// Empirical frequency of `outcome`.
    ///
    /// # Errors
    /// * `SimError::InvalidSampleSize` for an empty tally.
    pub fn frequency(&self, outcome: O) -> Result<f64, SimError> {
        let total = self.total();
        if total == 0 {
            return Err(SimError::InvalidSampleSize { trials: 0 });
        }
        Ok(self.count(outcome) as f64 / total as f64)
    }

    /// Empirical frequency of `outcome`, in percent.
    pub fn percentage(&self, outcome: O) -> Result<f64, SimError> {
        Ok(self.frequency(outcome)? * 100.0)
    }

    /// Empirical frequencies of every outcome in canonical order.
    pub fn frequencies(&self) -> Result<Vec<f64>, SimError> {
        O::ALL.iter().map(|o| self.frequency(*o)).collect()
    }
}

/// Outcome tally plus observable statistics of one sampler run.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport<O: Outcome> {
    tally: SampleTally<O>,
    observable_means: Vec<f64>,
    observable_std_devs: Vec<f64>,
    sum_mean: f64,
    product_mean: f64,
}

impl<O: Outcome> SampleReport<O> {
    pub(crate) fn new(
        tally: SampleTally<O>,
        observable_means: Vec<f64>,
        observable_std_devs: Vec<f64>,
        sum_mean: f64,
        product_mean: f64,
    ) -> Self {
        Self {
            tally,
            observable_means,
            observable_std_devs,
            sum_mean,
            product_mean,
        }
    }

    /// Number of trials drawn.
    pub fn trials(&self) -> u64 {
        self.tally.total()
    }

    pub fn tally(&self) -> &SampleTally<O> {
        &self.tally
    }

    /// Sample mean of observable `k` (index into `O::OBSERVABLES`).
    pub fn mean(&self, k: usize) -> f64 {
        self.observable_means.get(k).copied().unwrap_or(0.0)
    }

    /// Population standard deviation of observable `k`.
    pub fn std_dev(&self, k: usize) -> f64 {
        self.observable_std_devs.get(k).copied().unwrap_or(0.0)
    }

    pub fn means(&self) -> &[f64] {
        &self.observable_means
    }

    pub fn std_devs(&self) -> &[f64] {
        &self.observable_std_devs
    }

    /// Mean over trials of the sum of all observables.
    pub fn sum_mean(&self) -> f64 {
        self.sum_mean
    }

    /// Mean over trials of the product of all observables (the correlation proxy).
    pub fn product_mean(&self) -> f64 {
        self.product_mean
    }
}

impl<O: Outcome> fmt::Display for SampleReport<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.trials();
        writeln!(f, "Sample Results (n={}):", n)?;
        if n == 0 {
            writeln!(f, "  No trials were drawn.")?;
            return Ok(());
        }
        writeln!(f, "  Counts:")?;
        for (outcome, count) in self.tally.iter() {
            writeln!(f, "    {:>10}: {:>8} ({:.2}%)", outcome.label(), count, count as f64 / n as f64 * 100.0)?;
        }
        writeln!(f, "  Observables:")?;
        for (k, name) in O::OBSERVABLES.iter().enumerate() {
            writeln!(f, "    {:>10}: mean {:.4}, std {:.4}", name, self.mean(k), self.std_dev(k))?;
        }
        if O::OBSERVABLES.len() > 1 {
            writeln!(f, "    {:>10}: {:.4}", "sum", self.sum_mean)?;
            writeln!(f, "    {:>10}: {:.4}", "product", self.product_mean)?;
        }
        Ok(())
    }
}
