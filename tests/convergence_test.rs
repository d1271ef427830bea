// tests/convergence_test.rs
use gbm_risk::{compute_analytics, SimulationConfig};

fn relative_error(steps: usize, n_sims: usize, seed: u64) -> f64 {
    let cfg = SimulationConfig::new(100.0, 0.05, 0.2, 1.0, steps, n_sims).with_seed(seed);
    let result = compute_analytics(&cfg, 105.0).expect("Valid configuration");
    let estimate = *result.running_price.last().unwrap();
    (estimate - result.reference_price).abs() / result.reference_price
}

#[test]
fn test_large_sample_matches_closed_form() {
    // Exact GBM transitions, so one step per path targets the same law as 252
    let rel_error = relative_error(1, 1_000_000, 42);
    println!("Relative error at 1,000,000 paths: {}", rel_error);
    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
}

#[test]
fn test_error_shrinks_with_sample_size() {
    // Average over seeds so a lucky small sample cannot pass by chance
    let small: f64 = (0..8).map(|s| relative_error(4, 1_000, 100 + s)).sum::<f64>() / 8.0;
    let large: f64 = (0..8).map(|s| relative_error(4, 100_000, 200 + s)).sum::<f64>() / 8.0;
    println!("Mean relative error: 1,000 paths {}, 100,000 paths {}", small, large);
    assert!(large < small, "error did not shrink: {} vs {}", large, small);
}

#[test]
fn test_std_error_tracks_estimator_spread() {
    let cfg = SimulationConfig::new(100.0, 0.05, 0.2, 1.0, 1, 200_000).with_seed(9);
    let result = compute_analytics(&cfg, 105.0).unwrap();
    let deviation = (result.call_price - result.reference_price).abs();
    assert!(result.std_error > 0.0);
    assert!(
        deviation < 5.0 * result.std_error,
        "deviation {} vs std error {}",
        deviation,
        result.std_error
    );
}
