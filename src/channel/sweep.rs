// src/channel/sweep.rs

//! Parameter sweeps over grids of channel parameters.
//!
//! Grid cells are independent, so every sweep runs on rayon's thread pool.
//! Monte Carlo sweeps give each cell its own `StdRng` seeded from the base
//! seed and the cell index: results depend only on the inputs, never on
//! scheduling. Output is always in grid order.

use super::{Capacity, ParityCheckReport, capacity, mutual_information, simulate_parity_check};
use crate::core::SimError;
use crate::validation::check_probability;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;

/// `points` evenly spaced values on `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points).map(|i| if i == points - 1 { end } else { start + i as f64 * step }).collect()
        }
    }
}

/// Capacity of one `(epsilon0, epsilon1)` grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityPoint {
    pub epsilon0: f64,
    pub epsilon1: f64,
    #[serde(flatten)]
    pub capacity: Capacity,
}

/// Mutual information at one `(prior, epsilon0, epsilon1)` grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InformationPoint {
    pub prior: f64,
    pub epsilon0: f64,
    pub epsilon1: f64,
    pub mutual_information: f64,
}

fn check_all(name: &str, values: &[f64]) -> Result<(), SimError> {
    values.iter().try_for_each(|v| check_probability(name, *v).map(|_| ()))
}

/// Capacity over the grid `epsilons0 × epsilons1`, `epsilon1` varying slowest.
pub fn capacity_map(epsilons0: &[f64], epsilons1: &[f64], tolerance: f64) -> Result<Vec<CapacityPoint>, SimError> {
    check_all("epsilon0", epsilons0)?;
    check_all("epsilon1", epsilons1)?;
    let width = epsilons0.len();
    debug!("Capacity sweep over {} x {} cells", width, epsilons1.len());

    (0..width * epsilons1.len())
        .into_par_iter()
        .map(|cell| {
            let (epsilon0, epsilon1) = (epsilons0[cell % width], epsilons1[cell / width]);
            Ok(CapacityPoint { epsilon0, epsilon1, capacity: capacity(epsilon0, epsilon1, tolerance)? })
        })
        .collect()
}

/// Mutual information for a fixed prior over `epsilons0 × epsilons1`.
pub fn mutual_information_map(prior: f64, epsilons0: &[f64], epsilons1: &[f64]) -> Result<Vec<InformationPoint>, SimError> {
    check_probability("prior", prior)?;
    check_all("epsilon0", epsilons0)?;
    check_all("epsilon1", epsilons1)?;
    let width = epsilons0.len();

    Ok((0..width * epsilons1.len())
        .into_par_iter()
        .map(|cell| {
            let (epsilon0, epsilon1) = (epsilons0[cell % width], epsilons1[cell / width]);
            InformationPoint { prior, epsilon0, epsilon1, mutual_information: mutual_information(prior, epsilon0, epsilon1) }
        })
        .collect())
}

/// Mutual information of the symmetric channel over `priors × epsilons`,
/// `epsilon` varying slowest.
pub fn symmetric_information_map(priors: &[f64], epsilons: &[f64]) -> Result<Vec<InformationPoint>, SimError> {
    check_all("prior", priors)?;
    check_all("epsilon", epsilons)?;
    let width = priors.len();

    Ok((0..width * epsilons.len())
        .into_par_iter()
        .map(|cell| {
            let (prior, epsilon) = (priors[cell % width], epsilons[cell / width]);
            InformationPoint { prior, epsilon0: epsilon, epsilon1: epsilon, mutual_information: mutual_information(prior, epsilon, epsilon) }
        })
        .collect())
}

/// Cells whose mutual information exceeds `threshold` bits.
pub fn above_threshold(points: &[InformationPoint], threshold: f64) -> Vec<InformationPoint> {
    points.iter().filter(|p| p.mutual_information > threshold).copied().collect()
}

/// Runs the parity-check experiment once per crossover in `epsilons`.
pub fn parity_sweep(epsilons: &[f64], trials: i64, seed: u64) -> Result<Vec<ParityCheckReport>, SimError> {
    debug!("Parity sweep over {} crossovers, {} trials each", epsilons.len(), trials);
    epsilons
        .par_iter()
        .enumerate()
        .map(|(i, epsilon)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            simulate_parity_check(*epsilon, trials, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::binary_entropy;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(0.0025, 0.5, 200);
        assert_eq!(values.len(), 200);
        assert_eq!(values[0], 0.0025);
        assert_eq!(values[199], 0.5);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
    }

    #[test]
    fn test_capacity_map_grid_order() -> Result<(), SimError> {
        let e0 = [0.01, 0.1, 0.2];
        let e1 = [0.05, 0.3];
        let map = capacity_map(&e0, &e1, 1e-6)?;
        assert_eq!(map.len(), 6);
        assert_eq!((map[1].epsilon0, map[1].epsilon1), (0.1, 0.05));
        assert_eq!((map[4].epsilon0, map[4].epsilon1), (0.1, 0.3));
        for point in &map {
            let direct = capacity(point.epsilon0, point.epsilon1, 1e-6)?;
            assert_eq!(point.capacity, direct);
        }
        Ok(())
    }

    #[test]
    fn test_symmetric_map_at_half_prior() -> Result<(), SimError> {
        let map = symmetric_information_map(&[0.5], &[0.0, 0.1, 0.5])?;
        for point in &map {
            assert!((point.mutual_information - (1.0 - binary_entropy(point.epsilon0))).abs() < 1e-6);
        }
        assert_eq!(above_threshold(&map, 0.5).len(), 2);
        Ok(())
    }

    #[test]
    fn test_sweeps_validate_inputs() {
        assert!(capacity_map(&[0.1, 1.1], &[0.1], 1e-6).is_err());
        assert!(mutual_information_map(-0.1, &[0.1], &[0.1]).is_err());
    }

    #[test]
    fn test_parity_sweep_is_reproducible() -> Result<(), SimError> {
        let epsilons = [0.01, 0.1, 0.2];
        let first = parity_sweep(&epsilons, 2000, 99)?;
        let second = parity_sweep(&epsilons, 2000, 99)?;
        assert_eq!(first, second);
        assert_eq!(first[1].epsilon, 0.1);
        Ok(())
    }
}
