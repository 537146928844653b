// src/experiment/report.rs

//! Results record of one experiment run.

use crate::channel::{Capacity, ParityCheckReport, PrefixCodeReport};
use crate::core::Outcome;
use crate::measurement::Expectations;
use crate::simulation::{OutcomeDistribution, SampleReport};
use serde::Serialize;
use std::fmt;

/// Observed and theoretical share of one outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRow {
    pub label: String,
    pub count: u64,
    pub percentage: f64,
    pub theoretical_percentage: f64,
}

/// Sample statistics of one observable next to its theoretical mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservableRow {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
    pub theoretical_mean: f64,
}

/// Results that only make sense for one kind of experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportDetails {
    Entanglement {
        angle_degrees: f64,
        sum_mean: f64,
        product_mean: f64,
        theoretical: Expectations,
        concurrence: f64,
    },
    SternGerlach {
        theoretical_std_dev: f64,
    },
    ParityCheck(ParityCheckReport),
    PrefixCode(PrefixCodeReport),
    Capacity(Capacity),
}

/// Everything an experiment run produced.
///
/// Sampled experiments fill `outcomes` and `observables`; the channel
/// experiments carry their figures in `details` and leave both empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub trials: u64,
    pub seed: Option<u64>,
    pub outcomes: Vec<OutcomeRow>,
    pub observables: Vec<ObservableRow>,
    pub details: ReportDetails,
}

impl ExperimentReport {
    /// Builds the outcome and observable rows of a sampled run.
    pub(crate) fn sampled<O: Outcome>(
        sample: &SampleReport<O>,
        theory: &OutcomeDistribution<O>,
        seed: u64,
        details: ReportDetails,
    ) -> Self {
        let n = sample.trials();
        let outcomes = sample
            .tally()
            .iter()
            .map(|(outcome, count)| OutcomeRow {
                label: outcome.label().to_string(),
                count,
                percentage: if n == 0 { 0.0 } else { count as f64 / n as f64 * 100.0 },
                theoretical_percentage: theory.probability(outcome) * 100.0,
            })
            .collect();
        let observables = O::OBSERVABLES
            .iter()
            .enumerate()
            .map(|(k, name)| ObservableRow {
                name: name.to_string(),
                mean: sample.mean(k),
                std_dev: sample.std_dev(k),
                theoretical_mean: theory.expectation(k),
            })
            .collect();
        Self { trials: n, seed: Some(seed), outcomes, observables, details }
    }

    /// Looks up an outcome row by its label (`"++"`, `"+"`, ...).
    pub fn outcome(&self, label: &str) -> Option<&OutcomeRow> {
        self.outcomes.iter().find(|row| row.label == label)
    }

    /// Looks up an observable row by name (`"A"`, `"sigma"`, ...).
    pub fn observable(&self, name: &str) -> Option<&ObservableRow> {
        self.observables.iter().find(|row| row.name == name)
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, crate::core::SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v))
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seed {
            Some(seed) => writeln!(f, "Experiment Results (n={}, seed={}):", self.trials, seed)?,
            None => writeln!(f, "Experiment Results:")?,
        }

        if !self.outcomes.is_empty() {
            writeln!(f, "  {:>8} {:>10} {:>10} {:>10}", "outcome", "count", "observed", "theory")?;
            for row in &self.outcomes {
                writeln!(
                    f,
                    "  {:>8} {:>10} {:>9.2}% {:>9.2}%",
                    row.label, row.count, row.percentage, row.theoretical_percentage
                )?;
            }
        }
        for row in &self.observables {
            writeln!(
                f,
                "  <{}> = {:.4} (theory {:.4}), std {:.4}",
                row.name, row.mean, row.theoretical_mean, row.std_dev
            )?;
        }

        match &self.details {
            ReportDetails::Entanglement { angle_degrees, sum_mean, product_mean, theoretical, concurrence } => {
                writeln!(f, "  alpha = {:.1} deg, concurrence {:.4}", angle_degrees, concurrence)?;
                writeln!(f, "  <A+B> = {:.4} (theory {:.4})", sum_mean, theoretical.sum)?;
                writeln!(f, "  <A*B> = {:.4} (theory {:.4})", product_mean, theoretical.product)?;
            }
            ReportDetails::SternGerlach { theoretical_std_dev } => {
                writeln!(f, "  theoretical std {:.4}", theoretical_std_dev)?;
            }
            ReportDetails::ParityCheck(r) => {
                writeln!(f, "  epsilon = {}", r.epsilon)?;
                writeln!(
                    f,
                    "  4-bit corrupted: {:.2}% (theory {:.2}%)",
                    r.plain_corrupted_percent, r.theoretical_plain_corrupted_percent
                )?;
                writeln!(
                    f,
                    "  5-bit corrupted: {:.2}% (theory {:.2}%)",
                    r.coded_corrupted_percent, r.theoretical_coded_corrupted_percent
                )?;
                writeln!(
                    f,
                    "  detected among corrupted: {} (theory {})",
                    percent(r.detected_percent_of_corrupted),
                    percent(r.theoretical_detected_percent)
                )?;
            }
            ReportDetails::PrefixCode(r) => {
                writeln!(f, "  epsilon0 = {}, epsilon1 = {}", r.epsilon0, r.epsilon1)?;
                writeln!(f, "  corrupted: {:.2}% (theory {:.2}%)", r.corrupted_percent, r.theoretical_corrupted_percent)?;
            }
            ReportDetails::Capacity(c) => {
                writeln!(f, "  capacity {:.6} bits at P(X=0) = {:.6}", c.capacity, c.optimal_prior)?;
            }
        }
        Ok(())
    }
}
