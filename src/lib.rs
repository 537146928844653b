// src/lib.rs

//! `quantsim` - Monte Carlo statistics for quantum measurements and noisy binary channels
//!
//! Every simulation follows the same pattern: normalize an amplitude
//! vector (or take channel parameters), derive the exact outcome
//! probabilities, draw a seeded Monte Carlo sample consistent with them and
//! compare the sample statistics with theory.

pub mod core;
pub mod measurement;
pub mod simulation;
pub mod channel;
pub mod validation;
pub mod experiment;

// Re-export the most common types for easier top-level use
pub use crate::core::{AmplitudeState, Delivery, JointSpin, Outcome, ParityOutcome, SimError, Spin};
pub use crate::measurement::{ExchangeEvolution, Expectations, SpinMeasurement, TwoQubitMeasurement};
pub use crate::simulation::{OutcomeDistribution, SampleReport, SampleTally, Sampler, TrialModel};
pub use crate::channel::{BinaryChannel, Capacity, PrefixCode, binary_entropy, bisect, capacity, mutual_information};
pub use crate::experiment::{ExperimentBuilder, ExperimentConfig, ExperimentReport, run};
pub use crate::validation::{check_distribution, check_normalization, check_probability, check_tolerance};

// Example 1: Bell state measured with detector B rotated by 45 degrees
// Outcomes are always drawn A first, then B from the collapsed state.
/// ```
/// use quantsim::{AmplitudeState, JointSpin, Sampler, SimError, TrialModel, TwoQubitMeasurement};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// # fn main() -> Result<(), SimError> {
/// // (|00> + |11>) / sqrt(2)
/// let state = AmplitudeState::from_real(&[1.0, 0.0, 0.0, 1.0])?;
/// let measurement = TwoQubitMeasurement::from_degrees(state, 45.0)?;
///
/// // <A*B> = cos(alpha) for this state
/// let theory = measurement.expectations()?;
/// assert!((theory.product - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
///
/// let mut rng = StdRng::seed_from_u64(2024);
/// let report = Sampler::new(100_000).run(&measurement, &mut rng);
/// assert_eq!(report.tally().total(), 100_000);
///
/// let p = measurement.theoretical()?.probability(JointSpin::PlusPlus);
/// let f = report.tally().frequency(JointSpin::PlusPlus)?;
/// assert!((f - p).abs() < 0.01);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Channel capacity and the parity-check experiment from a JSON record
/// ```
/// use quantsim::{ExperimentConfig, SimError, binary_entropy, capacity, run};
/// use quantsim::experiment::ReportDetails;
///
/// # fn main() -> Result<(), SimError> {
/// // Binary symmetric channel: C = 1 - H(eps), reached at the uniform prior
/// let c = capacity(0.1, 0.1, 1e-9)?;
/// assert!((c.capacity - (1.0 - binary_entropy(0.1))).abs() < 1e-6);
///
/// let config = ExperimentConfig::from_json(r#"{"kind": "parity_check", "epsilon": 0.1, "trials": 50000, "seed": 1}"#)?;
/// let report = run(&config)?;
/// println!("{}", report);
/// match report.details {
///     ReportDetails::ParityCheck(parity) => {
///         assert!((parity.theoretical_plain_corrupted_percent - 34.39).abs() < 1e-9);
///         assert!((parity.plain_corrupted_percent - 34.39).abs() < 1.5);
///     }
///     other => panic!("unexpected details {:?}", other),
/// }
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
