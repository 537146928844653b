// src/simulation/engine.rs
use crate::core::Outcome;
use crate::simulation::results::{SampleReport, SampleTally};

/// Selects an index by cumulative-probability partitioning.
///
/// Walks `weights` in order and returns the first index whose cumulative
/// mass exceeds `r`. If rounding leaves `r` at or above the total mass,
/// the last index with non-zero weight is used. Zero-weight entries are
/// never selected unless every weight is zero, in which case index 0 is
/// returned.
pub(crate) fn select_cumulative(weights: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    let mut fallback = 0;
    for (index, weight) in weights.iter().enumerate() {
        if *weight > 0.0 {
            fallback = index;
        }
        cumulative += *weight;
        if r < cumulative {
            return index;
        }
    }
    fallback
}

/// Running counts and observable sums for one sampler run.
///
/// Observables are small signed integers, so every sum is kept exactly in
/// `i64` and only converted to `f64` when the report is built.
pub(crate) struct Accumulator<O: Outcome> {
    tally: SampleTally<O>,
    sums: Vec<i64>,
    sum_squares: Vec<i64>,
    elementwise_sum: i64,
    elementwise_product: i64,
}

impl<O: Outcome> Accumulator<O> {
    pub(crate) fn new() -> Self {
        let observables = O::OBSERVABLES.len();
        Self {
            tally: SampleTally::new(),
            sums: vec![0; observables],
            sum_squares: vec![0; observables],
            elementwise_sum: 0,
            elementwise_product: 0,
        }
    }

    pub(crate) fn record(&mut self, outcome: O) {
        self.tally.increment(outcome);
        let values = outcome.values();
        let mut sum = 0i64;
        let mut product = 1i64;
        for (k, value) in values.iter().enumerate() {
            let v = i64::from(*value);
            self.sums[k] += v;
            self.sum_squares[k] += v * v;
            sum += v;
            product *= v;
        }
        self.elementwise_sum += sum;
        self.elementwise_product += product;
    }

    pub(crate) fn finish(self) -> SampleReport<O> {
        let n = self.tally.total();
        // N = 0 yields zero aggregates rather than dividing by zero
        let mean_of = |total: i64| if n == 0 { 0.0 } else { total as f64 / n as f64 };

        let means: Vec<f64> = self.sums.iter().map(|s| mean_of(*s)).collect();
        let std_devs: Vec<f64> = self
            .sum_squares
            .iter()
            .zip(&means)
            .map(|(sq, mean)| (mean_of(*sq) - mean * mean).max(0.0).sqrt())
            .collect();

        SampleReport::new(
            self.tally,
            means,
            std_devs,
            mean_of(self.elementwise_sum),
            mean_of(self.elementwise_product),
        )
    }
}
