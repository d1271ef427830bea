// tests/analytics_test.rs
use approx::assert_relative_eq;
use gbm_risk::error::SimError;
use gbm_risk::render::{render_charts, ChartSet, CsvChartSink};
use gbm_risk::{compute_analytics, GbmSimulator, SimulationConfig};

#[test]
fn test_zero_volatility_scenario() {
    let cfg = SimulationConfig::new(100.0, 0.05, 0.0, 1.0, 252, 10).with_seed(0);
    let result = compute_analytics(&cfg, 105.0).expect("Valid configuration");

    let forward = 100.0 * 0.05f64.exp();
    let expected_price = (forward - 105.0) * (-0.05f64).exp();
    assert_relative_eq!(result.call_price, expected_price, max_relative = 1e-9);
    assert_relative_eq!(result.call_price, 0.1209, epsilon = 1e-4);

    for &loss in &result.losses {
        assert_relative_eq!(loss, 100.0 - forward, max_relative = 1e-9);
    }
    assert_relative_eq!(result.var_95, -5.127, epsilon = 1e-3);
    assert_relative_eq!(result.cvar_95, result.var_95, max_relative = 1e-12);
    assert_relative_eq!(result.reference_price, expected_price, max_relative = 1e-9);
    assert_eq!(result.std_error, 0.0);
    assert!(result.drawdown.iter().all(|&d| d == 0.0));
}

#[test]
fn test_var_never_exceeds_cvar() {
    for (seed, sigma) in [(1u64, 0.1), (2, 0.2), (3, 0.6), (4, 1.2)] {
        let cfg = SimulationConfig::new(100.0, 0.03, sigma, 1.0, 20, 5_000).with_seed(seed);
        let result = compute_analytics(&cfg, 100.0).expect("Valid configuration");
        assert!(
            result.var_95 <= result.cvar_95 + 1e-12,
            "VaR {} > CVaR {} (sigma {})",
            result.var_95,
            result.cvar_95,
            sigma
        );
    }
}

#[test]
fn test_overflowing_discount_is_reported() {
    // Terminal prices stay finite (~2e-13) but e^(720) does not
    let cfg = SimulationConfig::new(1e300, -720.0, 0.0, 1.0, 1, 3).with_seed(1);
    match compute_analytics(&cfg, 0.0) {
        Err(SimError::NumericDegeneracy { .. }) => {}
        other => panic!(
            "expected NumericDegeneracy, got {:?}",
            other.map(|r| r.call_price)
        ),
    }
}

#[test]
fn test_single_simulation() {
    let cfg = SimulationConfig::new(100.0, 0.05, 0.2, 1.0, 50, 1).with_seed(12);
    let result = compute_analytics(&cfg, 95.0).expect("Valid configuration");

    assert_eq!(result.running_price.len(), 1);
    assert_eq!(result.running_price[0], result.call_price);
    assert_eq!(result.var_95, result.losses[0]);
    assert_eq!(result.cvar_95, result.losses[0]);
    assert!(result.call_price.is_finite());
}

#[test]
fn test_drawdown_profile() {
    let cfg = SimulationConfig::new(100.0, 0.0, 0.4, 1.0, 252, 20).with_seed(21);
    let result = compute_analytics(&cfg, 100.0).expect("Valid configuration");

    assert_eq!(result.drawdown.len(), 253);
    assert_eq!(result.drawdown[0], 0.0);
    assert!(result.drawdown.iter().all(|&d| d <= 0.0 && d > -1.0));
    let min = result.drawdown.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(result.max_drawdown, min);
    assert!(result.worst_max_drawdown <= result.max_drawdown);
}

#[test]
fn test_running_price_ends_at_call_price() {
    let cfg = SimulationConfig::new(100.0, 0.05, 0.2, 1.0, 10, 2_000).with_seed(31);
    let result = compute_analytics(&cfg, 105.0).expect("Valid configuration");
    assert_eq!(result.running_price.len(), 2_000);
    assert_relative_eq!(
        *result.running_price.last().unwrap(),
        result.call_price,
        max_relative = 1e-10
    );
}

#[test]
fn test_strike_validation() {
    let cfg = SimulationConfig::new(100.0, 0.05, 0.2, 1.0, 10, 10).with_seed(1);
    assert!(matches!(
        compute_analytics(&cfg, -0.01),
        Err(SimError::InvalidParameter { .. })
    ));
    assert!(matches!(
        compute_analytics(&cfg, f64::NAN),
        Err(SimError::InvalidParameter { .. })
    ));
    assert!(compute_analytics(&cfg, 0.0).is_ok());
}

#[test]
fn test_invalid_strike_writes_nothing() {
    let dir = std::env::temp_dir().join(format!("gbm_risk_invalid_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let cfg = SimulationConfig::new(100.0, 0.05, 0.2, 1.0, 10, 10).with_seed(1);
    let sim = GbmSimulator::new(cfg).unwrap();
    let mut sink = CsvChartSink::new();
    assert!(sim.run_analytics(-5.0, &mut sink, &dir).is_err());
    assert!(sink.written().is_empty());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_analytics_writes_four_artifacts() {
    let dir = std::env::temp_dir().join(format!("gbm_risk_run_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let cfg = SimulationConfig::new(100.0, 0.05, 0.2, 1.0, 30, 250).with_seed(4);
    let sim = GbmSimulator::new(cfg).unwrap();
    let mut sink = CsvChartSink::new();
    let result = sim.run_analytics(105.0, &mut sink, &dir).unwrap();

    let names: Vec<String> = sink
        .written()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "01_price_paths.csv",
            "02_loss_distribution.csv",
            "03_convergence.csv",
            "04_max_drawdown.csv"
        ]
    );

    let paths_csv = std::fs::read_to_string(dir.join("01_price_paths.csv")).unwrap();
    assert!(paths_csv.starts_with(&format!(
        "# GBM Paths Simulation (Price: {:.2})\n",
        result.call_price
    )));
    // header plus steps + 1 rows, 100 series columns
    let header = paths_csv.lines().nth(1).unwrap();
    assert_eq!(header.split(',').count(), 101);
    assert_eq!(paths_csv.lines().count(), 2 + 31);

    let written = render_charts(&result, &mut CsvChartSink::new(), &dir, ChartSet::DRAWDOWN).unwrap();
    assert_eq!(written, vec![dir.join("04_max_drawdown.png")]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_explicit_rng_analytics_are_reproducible() {
    let cfg = SimulationConfig::new(100.0, 0.05, 0.25, 0.5, 26, 400);
    let sim = GbmSimulator::new(cfg).unwrap();
    let a = sim
        .compute_analytics_with_rng(100.0, &mut gbm_risk::rng::seed_rng_from_u64(3))
        .unwrap();
    let b = sim
        .compute_analytics_with_rng(100.0, &mut gbm_risk::rng::seed_rng_from_u64(3))
        .unwrap();
    assert_eq!(a.call_price, b.call_price);
    assert_eq!(a.var_95, b.var_95);
    assert_eq!(a.drawdown, b.drawdown);
}
