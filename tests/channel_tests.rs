// tests/channel_tests.rs

use quantsim::channel::sweep::{capacity_map, linspace, parity_sweep, symmetric_information_map};
use quantsim::channel::{
    BinaryChannel, binary_entropy, mutual_information_derivative, simulate_parity_check, simulate_prefix_code,
    symmetric_mutual_information, z_channel_mutual_information,
};
use quantsim::{SimError, bisect, capacity};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_parity_check_at_ten_percent() -> Result<(), SimError> {
    let report = simulate_parity_check(0.1, 200_000, &mut rng(12))?;
    assert!((report.theoretical_plain_corrupted_percent - 34.39).abs() < 1e-9);
    assert!((report.plain_corrupted_percent - 34.39).abs() < 1.0);
    assert!((report.theoretical_coded_corrupted_percent - 40.951).abs() < 1e-9);

    let detected = report.detected_percent_of_corrupted.expect("corrupted symbols at epsilon 0.1");
    assert!((detected - 82.09).abs() < 1.0, "detected {}", detected);
    assert!((report.theoretical_detected_percent.unwrap_or(0.0) - 82.09).abs() < 0.01);
    Ok(())
}

#[test]
fn test_prefix_code_over_z_channel() -> Result<(), SimError> {
    let report = simulate_prefix_code(0.0, 0.1, 200_000, &mut rng(4))?;
    assert!((report.theoretical_corrupted_percent - 9.06).abs() < 0.01);
    assert!((report.corrupted_percent - report.theoretical_corrupted_percent).abs() < 0.5);
    Ok(())
}

#[test]
fn test_entropy_and_information_identities() {
    assert_eq!(binary_entropy(0.0), 0.0);
    assert_eq!(binary_entropy(1.0), 0.0);
    assert!((binary_entropy(0.5) - 1.0).abs() < 1e-9);

    for prior in linspace(0.0, 1.0, 21) {
        assert!(symmetric_mutual_information(prior, 0.5) < 1e-3);
        // A Z-channel that never flips is noiseless
        assert!((z_channel_mutual_information(prior, 0.0) - binary_entropy(prior)).abs() < 1e-6);
    }
}

#[test]
fn test_derivative_is_decreasing_in_prior() -> Result<(), SimError> {
    let channel = BinaryChannel::new(0.05, 0.25)?;
    let values: Vec<f64> = linspace(0.01, 0.99, 50)
        .into_iter()
        .map(|p| channel.mutual_information_derivative(p))
        .collect::<Result<_, _>>()?;
    assert!(values.windows(2).all(|w| w[1] < w[0]));
    assert!(values[0] > 0.0 && values[49] < 0.0);
    Ok(())
}

#[test]
fn test_bisection_contract() -> Result<(), SimError> {
    let root = bisect(|x| 2.0 * (x - 0.42), 0.0, 1.0, 1e-7)?;
    assert!((root - 0.42).abs() <= 1e-7);
    assert!(matches!(bisect(|x| x * x + 1.0, -1.0, 1.0, 1e-6), Err(SimError::NoSignChange { .. })));
    Ok(())
}

#[test]
fn test_capacity_matches_derivative_root() -> Result<(), SimError> {
    for (e0, e1) in [(0.1, 0.1), (0.0, 0.5), (0.02, 0.3), (0.4, 0.05)] {
        let c = capacity(e0, e1, 1e-10)?;
        assert!(mutual_information_derivative(c.optimal_prior, e0, e1).abs() < 1e-5, "({}, {})", e0, e1);
        assert!(c.capacity >= 0.0 && c.capacity <= 1.0);
    }
    let bsc = BinaryChannel::symmetric(0.2)?.capacity(1e-9)?;
    assert!((bsc.capacity - (1.0 - binary_entropy(0.2))).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_capacity_map_is_symmetric_under_relabeling() -> Result<(), SimError> {
    // Swapping the roles of 0 and 1 swaps e0 and e1 without changing capacity
    let grid = linspace(0.05, 0.45, 5);
    let map = capacity_map(&grid, &grid, 1e-9)?;
    let width = grid.len();
    for i in 0..width {
        for j in 0..width {
            let a = map[j * width + i].capacity.capacity;
            let b = map[i * width + j].capacity.capacity;
            assert!((a - b).abs() < 1e-6);
        }
    }
    Ok(())
}

#[test]
fn test_symmetric_information_peaks_at_uniform_prior() -> Result<(), SimError> {
    let priors = linspace(0.0, 1.0, 101);
    let map = symmetric_information_map(&priors, &[0.15])?;
    let best = map
        .iter()
        .max_by(|a, b| a.mutual_information.total_cmp(&b.mutual_information))
        .map(|p| p.prior);
    assert_eq!(best, Some(0.5));
    Ok(())
}

#[test]
fn test_parity_sweep_tracks_theory() -> Result<(), SimError> {
    let epsilons = [0.01, 0.05, 0.1, 0.2];
    for report in parity_sweep(&epsilons, 100_000, 2024)? {
        assert!(
            (report.plain_corrupted_percent - report.theoretical_plain_corrupted_percent).abs() < 1.0,
            "epsilon {}",
            report.epsilon
        );
    }
    Ok(())
}
