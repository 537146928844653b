// src/channel/capacity.rs

//! Root finding by bisection and the capacity of an asymmetric binary channel.

use super::{clip_probability, clipped_entropy, mutual_information, output_zero_probability};
use crate::core::{CLIP_EPSILON, SimError};
use crate::validation::{check_probability, check_tolerance};
use log::{debug, trace};
use serde::Serialize;

/// dI/dp of [`mutual_information`] with respect to the prior `p = P(X=0)`:
///
/// `(1 - e0 - e1) * log2(P(Y=1) / P(Y=0)) - H(e0) + H(e1)`
///
/// Probabilities are clipped like in [`mutual_information`]. The function is
/// decreasing in `p` because I(X;Y) is concave in the prior.
pub fn mutual_information_derivative(prior: f64, epsilon0: f64, epsilon1: f64) -> f64 {
    let (p, e0, e1) = (clip_probability(prior), clip_probability(epsilon0), clip_probability(epsilon1));
    let p_y0 = clip_probability(output_zero_probability(p, e0, e1));
    let p_y1 = 1.0 - p_y0;
    (1.0 - e0 - e1) * (p_y1 / p_y0).log2() - clipped_entropy(e0) + clipped_entropy(e1)
}

/// Finds a zero of `f` inside the bracket `[a, b]` by repeated halving.
///
/// Stops once the bracket is no wider than `tolerance` (or can no longer be
/// split in `f64`) and returns its midpoint. An endpoint where `f` is
/// exactly zero is returned as is.
///
/// # Errors
/// * `SimError::InvalidTolerance` if `tolerance` is negative or not finite.
/// * `SimError::NoSignChange` if `f(a)` and `f(b)` have the same sign or
///   either of them is not finite.
pub fn bisect<F>(f: F, a: f64, b: f64, tolerance: f64) -> Result<f64, SimError>
where
    F: Fn(f64) -> f64,
{
    let tolerance = check_tolerance(tolerance)?;
    let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if !(f_lo * f_hi < 0.0) {
        return Err(SimError::NoSignChange { a: lo, b: hi, fa: f_lo, fb: f_hi });
    }

    let mut steps = 0u32;
    while hi - lo > tolerance {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = f(mid);
        trace!("bisect step {}: [{}, {}] f(mid)={}", steps, lo, hi, f_mid);
        if f_mid == 0.0 {
            debug!("bisect hit an exact root after {} steps", steps);
            return Ok(mid);
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
        steps += 1;
    }
    debug!("bisect converged after {} steps to width {:e}", steps, hi - lo);
    Ok(lo + (hi - lo) / 2.0)
}

/// Capacity-achieving prior and the capacity itself, in bits per channel use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Capacity {
    pub optimal_prior: f64,
    pub capacity: f64,
}

/// Capacity of the binary channel `(epsilon0, epsilon1)`.
///
/// Bisects [`mutual_information_derivative`] over the prior on [0, 1].
/// When `epsilon0 + epsilon1 = 1` the output does not depend on the input;
/// the capacity is 0 and the prior 1/2 is reported.
///
/// # Errors
/// * `SimError::InvalidProbability` for crossovers outside [0, 1].
/// * `SimError::InvalidTolerance` if `tolerance` is negative or not finite,
///   even for a useless channel.
/// * `SimError::NoSignChange` if the derivative does not change sign,
///   which does not happen for valid parameters.
pub fn capacity(epsilon0: f64, epsilon1: f64, tolerance: f64) -> Result<Capacity, SimError> {
    let e0 = check_probability("epsilon0", epsilon0)?;
    let e1 = check_probability("epsilon1", epsilon1)?;
    let tolerance = check_tolerance(tolerance)?;

    if (1.0 - e0 - e1).abs() < CLIP_EPSILON {
        return Ok(Capacity { optimal_prior: 0.5, capacity: 0.0 });
    }

    let optimal_prior = bisect(|p| mutual_information_derivative(p, e0, e1), 0.0, 1.0, tolerance)?;
    let capacity = mutual_information(optimal_prior, e0, e1);
    debug!("capacity(e0={}, e1={}) = {} at p={}", e0, e1, capacity, optimal_prior);
    Ok(Capacity { optimal_prior, capacity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::binary_entropy;

    #[test]
    fn test_bisect_parabola_derivative() -> Result<(), SimError> {
        // d/dx (x - 0.3)^2 = 2(x - 0.3)
        let root = bisect(|x| 2.0 * (x - 0.3), 0.0, 1.0, 1e-8)?;
        assert!((root - 0.3).abs() <= 1e-8);

        let root = bisect(|x| -(x - 1.7), 2.5, -1.0, 1e-6)?;
        assert!((root - 1.7).abs() <= 1e-6);
        Ok(())
    }

    #[test]
    fn test_bisect_same_sign_bracket() {
        let result = bisect(|x| 2.0 * (x - 0.3), 0.5, 1.0, 1e-6);
        assert!(matches!(result, Err(SimError::NoSignChange { .. })));

        let result = bisect(|_| f64::NAN, 0.0, 1.0, 1e-6);
        assert!(matches!(result, Err(SimError::NoSignChange { .. })));
    }

    #[test]
    fn test_bisect_root_at_endpoint() -> Result<(), SimError> {
        assert_eq!(bisect(|x| x, 0.0, 1.0, 1e-6)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_bisect_terminates_with_zero_tolerance() -> Result<(), SimError> {
        let root = bisect(|x| x * x - 2.0, 0.0, 2.0, 0.0)?;
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_non_finite_tolerance_is_rejected() {
        for tolerance in [f64::NAN, f64::INFINITY, -1e-6] {
            let root = bisect(|x| 2.0 * (x - 0.3), 0.0, 1.0, tolerance);
            assert!(matches!(root, Err(SimError::InvalidTolerance { .. })), "bisect tol {}", tolerance);

            let c = capacity(0.0, 0.5, tolerance);
            assert!(matches!(c, Err(SimError::InvalidTolerance { .. })), "capacity tol {}", tolerance);
            // Checked before the useless-channel shortcut too
            let c = capacity(0.3, 0.7, tolerance);
            assert!(matches!(c, Err(SimError::InvalidTolerance { .. })));
        }
    }

    #[test]
    fn test_symmetric_capacity() -> Result<(), SimError> {
        for eps in [0.0, 0.05, 0.1, 0.3] {
            let c = capacity(eps, eps, 1e-9)?;
            assert!((c.optimal_prior - 0.5).abs() < 1e-6, "eps={} prior={}", eps, c.optimal_prior);
            assert!((c.capacity - (1.0 - binary_entropy(eps))).abs() < 1e-6, "eps={}", eps);
        }
        Ok(())
    }

    #[test]
    fn test_z_channel_capacity() -> Result<(), SimError> {
        // Z-channel with e1 = 1/2: C = log2(5/4), reached at P(X=1) = 2/5
        let c = capacity(0.0, 0.5, 1e-9)?;
        assert!((c.capacity - (1.25f64).log2()).abs() < 1e-6);
        assert!((c.optimal_prior - 0.6).abs() < 1e-4);
        Ok(())
    }

    #[test]
    fn test_useless_channel_capacity() -> Result<(), SimError> {
        let c = capacity(0.3, 0.7, 1e-6)?;
        assert_eq!(c.capacity, 0.0);
        Ok(())
    }

    #[test]
    fn test_derivative_vanishes_at_optimum() -> Result<(), SimError> {
        let c = capacity(0.05, 0.2, 1e-10)?;
        assert!(mutual_information_derivative(c.optimal_prior, 0.05, 0.2).abs() < 1e-6);
        // Optimum beats nearby priors
        assert!(c.capacity >= mutual_information(c.optimal_prior - 0.01, 0.05, 0.2));
        assert!(c.capacity >= mutual_information(c.optimal_prior + 0.01, 0.05, 0.2));
        Ok(())
    }
}
