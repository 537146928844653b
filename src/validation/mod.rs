// src/validation/mod.rs

//! Input checks shared by the measurement, sampling and channel modules.

use crate::core::{AmplitudeState, SimError, NORM_TOLERANCE};

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `AmplitudeState` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimError::DegenerateState)` otherwise (including the null collapse vector).
pub fn check_normalization(state: &AmplitudeState, tolerance: Option<f64>) -> Result<(), SimError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(SimError::DegenerateState {
            message: format!("State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})", norm_sq, effective_tolerance),
        })
    } else {
        Ok(())
    }
}

/// Checks that `value` is a probability in [0, 1].
pub fn check_probability(name: &str, value: f64) -> Result<f64, SimError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::InvalidProbability { name: name.to_string(), value })
    }
}

/// Checks that a bisection tolerance is finite and not negative.
///
/// Zero is accepted and means "halve until `f64` runs out of precision".
pub fn check_tolerance(tolerance: f64) -> Result<f64, SimError> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(SimError::InvalidTolerance { value: tolerance })
    }
}

/// Checks that every entry is a probability and that they sum to 1 within tolerance.
pub fn check_distribution(probabilities: &[f64], tolerance: Option<f64>) -> Result<(), SimError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    for (i, p) in probabilities.iter().enumerate() {
        check_probability(&format!("outcome {}", i), *p)?;
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > effective_tolerance {
        return Err(SimError::InvalidProbability { name: "total probability mass".to_string(), value: total });
    }
    Ok(())
}

/// Converts a caller-supplied trial count, rejecting negative values.
///
/// Zero is accepted: a run of zero trials is well defined and produces an
/// empty tally.
pub fn check_trials(trials: i64) -> Result<u64, SimError> {
    u64::try_from(trials).map_err(|_| SimError::InvalidSampleSize { trials })
}

/// Like [`check_trials`] but also rejects zero, for call sites that divide by N.
pub fn check_positive_trials(trials: i64) -> Result<u64, SimError> {
    match check_trials(trials)? {
        0 => Err(SimError::InvalidSampleSize { trials }),
        n => Ok(n),
    }
}
