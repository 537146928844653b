// src/experiment/mod.rs

//! Experiment configuration records and the runner that executes them.
//!
//! An [`ExperimentConfig`] names one experiment and its parameters. It can
//! be parsed from JSON (tagged by `"kind"`) or assembled with
//! [`ExperimentBuilder`]. [`run`] turns it into an [`ExperimentReport`].
//!
//! ```json
//! { "kind": "entanglement", "amplitudes": [[1, 0], [0, 0], [0, 0], [1, 0]],
//!   "angle_degrees": 45, "trials": 200000, "seed": 7 }
//! ```

mod report;

pub use report::{ExperimentReport, ObservableRow, OutcomeRow, ReportDetails};

use crate::channel::{capacity, simulate_parity_check, simulate_prefix_code};
use crate::core::{AmplitudeState, DEFAULT_SEED, DEFAULT_TOLERANCE, DEFAULT_TRIALS, SimError};
use crate::measurement::{SpinMeasurement, TwoQubitMeasurement};
use crate::simulation::{Sampler, TrialModel};
use crate::validation::check_tolerance;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

fn default_trials() -> i64 {
    DEFAULT_TRIALS
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// One experiment and its parameters.
///
/// Amplitudes are `(re, im)` pairs and need not be normalized. Angles are
/// in degrees. Trial counts are signed so that a negative count in a
/// configuration file is reported as `SimError::InvalidSampleSize` rather
/// than as a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ExperimentConfig {
    /// Detector A along z on the first qubit, detector B rotated by
    /// `angle_degrees` on the second.
    Entanglement {
        amplitudes: Vec<(f64, f64)>,
        #[serde(default)]
        angle_degrees: f64,
        #[serde(default = "default_trials")]
        trials: i64,
        #[serde(default = "default_seed")]
        seed: u64,
    },
    /// One spin-1/2 through a z-oriented magnet.
    SternGerlach {
        amplitudes: Vec<(f64, f64)>,
        #[serde(default = "default_trials")]
        trials: i64,
        #[serde(default = "default_seed")]
        seed: u64,
    },
    /// Plain 4-bit symbols against parity-coded 5-bit symbols.
    ParityCheck {
        epsilon: f64,
        #[serde(default = "default_trials")]
        trials: i64,
        #[serde(default = "default_seed")]
        seed: u64,
    },
    /// Truncated unary code over an asymmetric channel.
    PrefixCode {
        epsilon0: f64,
        epsilon1: f64,
        #[serde(default = "default_trials")]
        trials: i64,
        #[serde(default = "default_seed")]
        seed: u64,
    },
    /// Capacity of an asymmetric channel, no sampling involved.
    Capacity {
        epsilon0: f64,
        epsilon1: f64,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
    },
}

impl ExperimentConfig {
    /// Parses a configuration record from JSON.
    ///
    /// # Errors
    /// * `SimError::Config` if the text is not a valid record.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(text)?;
        debug!("Parsed {} configuration", config.kind());
        Ok(config)
    }

    /// Serializes the record as JSON.
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The `"kind"` tag of the record.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Entanglement { .. } => "entanglement",
            Self::SternGerlach { .. } => "stern_gerlach",
            Self::ParityCheck { .. } => "parity_check",
            Self::PrefixCode { .. } => "prefix_code",
            Self::Capacity { .. } => "capacity",
        }
    }

    /// Seed of the run's generator; `None` for experiments that draw nothing.
    pub fn seed(&self) -> Option<u64> {
        match self {
            Self::Entanglement { seed, .. }
            | Self::SternGerlach { seed, .. }
            | Self::ParityCheck { seed, .. }
            | Self::PrefixCode { seed, .. } => Some(*seed),
            Self::Capacity { .. } => None,
        }
    }
}

/// Assembles an [`ExperimentConfig`] using method chaining.
///
/// Unset parameters take the same defaults as an omitted JSON field. A
/// setter that does not apply to the chosen experiment makes
/// [`ExperimentBuilder::build`] fail.
#[derive(Debug, Clone)]
pub struct ExperimentBuilder {
    config: ExperimentConfig,
    misuse: Option<&'static str>,
}

impl ExperimentBuilder {
    fn with(config: ExperimentConfig) -> Self {
        Self { config, misuse: None }
    }

    pub fn entanglement<I: IntoIterator<Item = (f64, f64)>>(amplitudes: I) -> Self {
        Self::with(ExperimentConfig::Entanglement {
            amplitudes: amplitudes.into_iter().collect(),
            angle_degrees: 0.0,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
        })
    }

    pub fn stern_gerlach<I: IntoIterator<Item = (f64, f64)>>(amplitudes: I) -> Self {
        Self::with(ExperimentConfig::SternGerlach {
            amplitudes: amplitudes.into_iter().collect(),
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
        })
    }

    pub fn parity_check(epsilon: f64) -> Self {
        Self::with(ExperimentConfig::ParityCheck { epsilon, trials: DEFAULT_TRIALS, seed: DEFAULT_SEED })
    }

    pub fn prefix_code(epsilon0: f64, epsilon1: f64) -> Self {
        Self::with(ExperimentConfig::PrefixCode { epsilon0, epsilon1, trials: DEFAULT_TRIALS, seed: DEFAULT_SEED })
    }

    pub fn capacity(epsilon0: f64, epsilon1: f64) -> Self {
        Self::with(ExperimentConfig::Capacity { epsilon0, epsilon1, tolerance: DEFAULT_TOLERANCE })
    }

    /// Rotation of detector B. Entanglement only.
    pub fn angle_degrees(mut self, degrees: f64) -> Self {
        match &mut self.config {
            ExperimentConfig::Entanglement { angle_degrees, .. } => *angle_degrees = degrees,
            _ => self.misuse = Some("angle_degrees"),
        }
        self
    }

    pub fn trials(mut self, n: i64) -> Self {
        match &mut self.config {
            ExperimentConfig::Entanglement { trials, .. }
            | ExperimentConfig::SternGerlach { trials, .. }
            | ExperimentConfig::ParityCheck { trials, .. }
            | ExperimentConfig::PrefixCode { trials, .. } => *trials = n,
            ExperimentConfig::Capacity { .. } => self.misuse = Some("trials"),
        }
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        match &mut self.config {
            ExperimentConfig::Entanglement { seed, .. }
            | ExperimentConfig::SternGerlach { seed, .. }
            | ExperimentConfig::ParityCheck { seed, .. }
            | ExperimentConfig::PrefixCode { seed, .. } => *seed = value,
            ExperimentConfig::Capacity { .. } => self.misuse = Some("seed"),
        }
        self
    }

    /// Bisection tolerance. Capacity only.
    pub fn tolerance(mut self, value: f64) -> Self {
        match &mut self.config {
            ExperimentConfig::Capacity { tolerance, .. } => *tolerance = value,
            _ => self.misuse = Some("tolerance"),
        }
        self
    }

    /// Consumes the builder and returns the record.
    ///
    /// # Errors
    /// * `SimError::Config` if a setter was used that the experiment does not take.
    /// * `SimError::InvalidTolerance` for a negative or non-finite capacity tolerance.
    pub fn build(self) -> Result<ExperimentConfig, SimError> {
        if let Some(setter) = self.misuse {
            return Err(SimError::Config {
                message: format!("'{}' does not apply to a {} experiment", setter, self.config.kind()),
            });
        }
        if let ExperimentConfig::Capacity { tolerance, .. } = &self.config {
            check_tolerance(*tolerance)?;
        }
        Ok(self.config)
    }
}

fn parse_state(amplitudes: &[(f64, f64)], expected: usize) -> Result<AmplitudeState, SimError> {
    if amplitudes.len() != expected {
        return Err(SimError::DimensionMismatch { expected, actual: amplitudes.len() });
    }
    AmplitudeState::from_pairs(amplitudes)
}

/// Runs the experiment described by `config` with a generator seeded from its `seed`.
///
/// # Errors
/// Any error of the underlying computation: a degenerate or wrongly sized
/// state, a probability outside [0, 1], or an invalid trial count
/// (negative; zero for the channel experiments).
pub fn run(config: &ExperimentConfig) -> Result<ExperimentReport, SimError> {
    let mut rng = StdRng::seed_from_u64(config.seed().unwrap_or(DEFAULT_SEED));
    debug!("Running {} experiment", config.kind());
    let report = match config {
        ExperimentConfig::Entanglement { amplitudes, angle_degrees, trials, seed } => {
            let model = TwoQubitMeasurement::from_degrees(parse_state(amplitudes, 4)?, *angle_degrees)?;
            let theory = model.theoretical()?;
            let sample = Sampler::with_trials(*trials)?.run(&model, &mut rng);
            let details = ReportDetails::Entanglement {
                angle_degrees: *angle_degrees,
                sum_mean: sample.sum_mean(),
                product_mean: sample.product_mean(),
                theoretical: model.expectations()?,
                concurrence: model.concurrence()?,
            };
            ExperimentReport::sampled(&sample, &theory, *seed, details)
        }
        ExperimentConfig::SternGerlach { amplitudes, trials, seed } => {
            let model = SpinMeasurement::new(parse_state(amplitudes, 2)?)?;
            let theory = model.theoretical()?;
            let sample = Sampler::with_trials(*trials)?.run(&model, &mut rng);
            let details = ReportDetails::SternGerlach { theoretical_std_dev: model.std_dev() };
            ExperimentReport::sampled(&sample, &theory, *seed, details)
        }
        ExperimentConfig::ParityCheck { epsilon, trials, seed } => {
            let parity = simulate_parity_check(*epsilon, *trials, &mut rng)?;
            ExperimentReport {
                trials: parity.trials,
                seed: Some(*seed),
                outcomes: Vec::new(),
                observables: Vec::new(),
                details: ReportDetails::ParityCheck(parity),
            }
        }
        ExperimentConfig::PrefixCode { epsilon0, epsilon1, trials, seed } => {
            let prefix = simulate_prefix_code(*epsilon0, *epsilon1, *trials, &mut rng)?;
            ExperimentReport {
                trials: prefix.trials,
                seed: Some(*seed),
                outcomes: Vec::new(),
                observables: Vec::new(),
                details: ReportDetails::PrefixCode(prefix),
            }
        }
        ExperimentConfig::Capacity { epsilon0, epsilon1, tolerance } => ExperimentReport {
            trials: 0,
            seed: None,
            outcomes: Vec::new(),
            observables: Vec::new(),
            details: ReportDetails::Capacity(capacity(*epsilon0, *epsilon1, *tolerance)?),
        },
    };
    debug!("{} experiment finished after {} trials", config.kind(), report.trials);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults() -> Result<(), SimError> {
        let config = ExperimentConfig::from_json(r#"{"kind": "parity_check", "epsilon": 0.1}"#)?;
        assert_eq!(config, ExperimentConfig::ParityCheck { epsilon: 0.1, trials: DEFAULT_TRIALS, seed: DEFAULT_SEED });

        let config = ExperimentConfig::from_json(r#"{"kind": "capacity", "epsilon0": 0.0, "epsilon1": 0.5}"#)?;
        assert_eq!(config.seed(), None);
        assert_eq!(config, ExperimentBuilder::capacity(0.0, 0.5).build()?);
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        for text in [
            r#"{"kind": "teleportation"}"#,
            r#"{"kind": "parity_check"}"#,
            r#"{"kind": "capacity", "epsilon0": 0.1, "epsilon1": 0.1, "seed": 3}"#,
            "not json",
        ] {
            assert!(matches!(ExperimentConfig::from_json(text), Err(SimError::Config { .. })), "{}", text);
        }
    }

    #[test]
    fn test_builder_rejects_foreign_setters() {
        let result = ExperimentBuilder::parity_check(0.1).angle_degrees(30.0).build();
        assert!(matches!(result, Err(SimError::Config { .. })));
        let result = ExperimentBuilder::capacity(0.1, 0.2).trials(10).build();
        assert!(matches!(result, Err(SimError::Config { .. })));
    }

    #[test]
    fn test_wrong_amplitude_count() -> Result<(), SimError> {
        let config = ExperimentBuilder::entanglement([(1.0, 0.0), (0.0, 0.0)]).trials(10).build()?;
        assert_eq!(run(&config), Err(SimError::DimensionMismatch { expected: 4, actual: 2 }));
        Ok(())
    }

    #[test]
    fn test_same_seed_same_report() -> Result<(), SimError> {
        let config = ExperimentBuilder::entanglement([(1.0, 0.0), (0.5, 0.0), (0.0, 0.3), (1.0, 0.0)])
            .angle_degrees(60.0)
            .trials(5000)
            .seed(42)
            .build()?;
        assert_eq!(run(&config)?, run(&config)?);
        Ok(())
    }

    #[test]
    fn test_zero_trials_sampled_report() -> Result<(), SimError> {
        let config = ExperimentBuilder::stern_gerlach([(1.0, 0.0), (1.0, 0.0)]).trials(0).build()?;
        let report = run(&config)?;
        assert_eq!(report.trials, 0);
        assert!(report.outcomes.iter().all(|row| row.count == 0 && row.percentage == 0.0));
        Ok(())
    }
}
