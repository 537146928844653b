// src/measurement/evolution.rs

//! Time evolution of two spins under an isotropic exchange coupling
//! `H = C S1·S2` (ħ = 1), starting from `|↑↓>`.
//!
//! The state stays in the `{|↑↓>, |↓↑>}` subspace:
//! `c01(t) = cos(ωt/2)`, `c10(t) = -i sin(ωt/2)`, so the populations swap
//! back and forth while the concurrence oscillates as `|sin ωt|`.

use crate::core::{AmplitudeState, SimError};
use crate::measurement::concurrence;
use num_complex::Complex;
use num_traits::Zero;
use serde::Serialize;

/// One sample of the exchange evolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvolutionPoint {
    /// Elapsed time since the start in `|↑↓>`
    pub time: f64,
    /// P(|↑↓>)
    pub p_up_down: f64,
    /// P(|↓↑>)
    pub p_down_up: f64,
    /// Entanglement of the state at `time`, `|sin ωt|`
    pub concurrence: f64,
}

/// Exchange evolution with angular frequency `omega`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeEvolution {
    omega: f64,
}

impl Default for ExchangeEvolution {
    fn default() -> Self {
        Self { omega: 1.0 }
    }
}

impl ExchangeEvolution {
    /// Evolution for the coupling frequency `omega`, in radians per unit time.
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// Angular frequency of the population swap.
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// The evolved state at time `t`, in the `|00>, |01>, |10>, |11>` basis.
    pub fn state_at(&self, t: f64) -> AmplitudeState {
        let (sin, cos) = (self.omega * t / 2.0).sin_cos();
        // Unit norm by construction
        AmplitudeState::from_raw(vec![
            Complex::zero(),
            Complex::new(cos, 0.0),
            Complex::new(0.0, -sin),
            Complex::zero(),
        ])
    }

    /// `(P(|↑↓>), P(|↓↑>))` at time `t`.
    pub fn probabilities_at(&self, t: f64) -> (f64, f64) {
        let (sin, cos) = (self.omega * t / 2.0).sin_cos();
        (cos * cos, sin * sin)
    }

    /// Closed-form concurrence `|sin ωt|`.
    pub fn concurrence_at(&self, t: f64) -> f64 {
        (self.omega * t).sin().abs()
    }

    /// Samples the evolution at `points` evenly spaced times on `[0, t_max]`,
    /// both ends included.
    pub fn trajectory(&self, t_max: f64, points: usize) -> Result<Vec<EvolutionPoint>, SimError> {
        let step = if points > 1 { t_max / (points - 1) as f64 } else { 0.0 };
        (0..points)
            .map(|i| {
                let time = i as f64 * step;
                let (p_up_down, p_down_up) = self.probabilities_at(time);
                Ok(EvolutionPoint {
                    time,
                    p_up_down,
                    p_down_up,
                    concurrence: concurrence(&self.state_at(time))?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PI;

    #[test]
    fn test_populations_swap() {
        let evolution = ExchangeEvolution::default();
        let (p01, p10) = evolution.probabilities_at(0.0);
        assert!((p01 - 1.0).abs() < 1e-12 && p10.abs() < 1e-12);
        let (p01, p10) = evolution.probabilities_at(PI);
        assert!(p01.abs() < 1e-12 && (p10 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trajectory_matches_closed_form_concurrence() -> Result<(), SimError> {
        let evolution = ExchangeEvolution::new(1.5);
        let trajectory = evolution.trajectory(4.0 * PI, 400)?;
        assert_eq!(trajectory.len(), 400);
        assert!((trajectory[399].time - 4.0 * PI).abs() < 1e-12);
        for point in &trajectory {
            assert!((point.p_up_down + point.p_down_up - 1.0).abs() < 1e-12);
            assert!((point.concurrence - evolution.concurrence_at(point.time)).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_trajectory_edge_sizes() -> Result<(), SimError> {
        let evolution = ExchangeEvolution::default();
        assert!(evolution.trajectory(1.0, 0)?.is_empty());
        let single = evolution.trajectory(1.0, 1)?;
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].time, 0.0);
        Ok(())
    }
}
