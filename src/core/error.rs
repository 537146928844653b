//! Error handling logic

use thiserror::Error;

/// Failures raised by the numeric core.
///
/// Every variant is reported at the point where the invalid input is
/// detected. The computations are deterministic given their inputs, so
/// none of them is worth retrying without changing the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The amplitude vector is all zeros, is empty, or contains non-finite
    /// components.
    #[error("Degenerate state: {message}")]
    DegenerateState {
        /// DegenerateState failure message
        message: String,
    },

    /// A trial count that is negative, or zero where it is used as a divisor.
    #[error("Invalid sample size: {trials} (must be positive)")]
    InvalidSampleSize {
        /// The rejected trial count
        trials: i64,
    },

    /// The two bracket endpoints handed to bisection do not straddle a root.
    #[error("No sign change on [{a}, {b}]: f(a) = {fa}, f(b) = {fb}")]
    NoSignChange {
        /// Lower bracket endpoint
        a: f64,
        /// Upper bracket endpoint
        b: f64,
        /// Function value at `a`
        fa: f64,
        /// Function value at `b`
        fb: f64,
    },

    /// A probability parameter outside [0, 1] (or NaN).
    #[error("Invalid probability for {name}: {value} (expected a value in [0, 1])")]
    InvalidProbability {
        /// Name of the offending parameter
        name: String,
        /// The rejected value
        value: f64,
    },

    /// A root-finding tolerance that is negative, infinite or NaN.
    #[error("Invalid tolerance: {value} (expected a finite value >= 0)")]
    InvalidTolerance {
        /// The rejected tolerance
        value: f64,
    },

    /// A state of the wrong length for the requested measurement.
    #[error("Dimension mismatch: expected {expected} amplitudes, got {actual}")]
    DimensionMismatch {
        /// Required number of amplitudes
        expected: usize,
        /// Number of amplitudes supplied
        actual: usize,
    },

    /// A configuration record that cannot be parsed or is inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// Config failure message
        message: String,
    },
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Config { message: err.to_string() }
    }
}
