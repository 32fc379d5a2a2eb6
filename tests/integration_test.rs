//! Integration tests for the full snapshot -> transform -> MP2 pipeline
//!
//! These run the shipped 6-hydrogen-chain example snapshot end to end and
//! compare against frozen reference values.

use std::path::PathBuf;

use rust_mp2::config::Config;
use rust_mp2::io::load_snapshot;
use rust_mp2::mp2_impl::Mp2;
use rust_mp2::provider::{IntegralProvider, SnapshotProvider};
use rust_mp2::transform_impl::strategy_by_name;

/// Frozen reference values for the example snapshot, recorded once from the
/// reference evaluation of the fixture
const REFERENCE_HF_ENERGY: f64 = -3.134282175;
const REFERENCE_CORRELATION_NOCC1: f64 = -0.0785994266691292;
const REFERENCE_CORRELATION_NOCC3: f64 = -0.07545871580963025;

fn example_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("example")
        .join(filename)
}

fn example_provider() -> SnapshotProvider {
    let path = example_path("h6_chain_snapshot.yaml");
    let snapshot = load_snapshot(path.to_str().unwrap()).unwrap();
    SnapshotProvider::new(snapshot).unwrap()
}

#[test]
fn hydrogen_chain_reproduces_the_reference_energies() {
    let provider = example_provider();
    let solution = provider.hf_solution();
    assert!(solution.converged);
    assert!((solution.energy - REFERENCE_HF_ENERGY).abs() < 1e-8);

    let g2e_ao = provider.electron_repulsion();
    for name in ["naive", "factored", "vectorized"] {
        let strategy = strategy_by_name(name).unwrap();
        let g2e_mo = strategy.transform(&g2e_ao, &solution.coefficients).unwrap();

        let mut mp2 = Mp2::from_solution(&solution, g2e_mo, Some(1)).unwrap();
        let correlation = mp2.calculate_energy().unwrap();
        assert!(
            (correlation - REFERENCE_CORRELATION_NOCC1).abs() < 1e-8,
            "strategy {}: E_corr = {:.15}",
            name,
            correlation
        );

        let total = mp2.total_energy().unwrap();
        assert!(
            (total - (REFERENCE_HF_ENERGY + REFERENCE_CORRELATION_NOCC1)).abs() < 1e-8,
            "strategy {}: E_total = {:.15}",
            name,
            total
        );
    }
}

#[test]
fn default_occupations_give_the_three_pair_reference_energy() {
    let provider = example_provider();
    let solution = provider.hf_solution();
    assert_eq!(solution.num_occupied(), 3);

    let strategy = strategy_by_name("vectorized").unwrap();
    let g2e_mo = strategy
        .transform(&provider.electron_repulsion(), &solution.coefficients)
        .unwrap();

    // nocc falls back to the occupation numbers
    let mut mp2 = Mp2::from_solution(&solution, g2e_mo, None).unwrap();
    assert_eq!(mp2.nocc, 3);
    let correlation = mp2.calculate_energy().unwrap();
    assert!(
        (correlation - REFERENCE_CORRELATION_NOCC3).abs() < 1e-8,
        "E_corr = {:.15}",
        correlation
    );
}

#[test]
fn strategies_agree_on_the_example_snapshot() {
    let provider = example_provider();
    let solution = provider.hf_solution();
    let g2e_ao = provider.electron_repulsion();

    let oracle = strategy_by_name("naive")
        .unwrap()
        .transform(&g2e_ao, &solution.coefficients)
        .unwrap();
    for name in ["factored", "vectorized"] {
        let g2e_mo = strategy_by_name(name)
            .unwrap()
            .transform(&g2e_ao, &solution.coefficients)
            .unwrap();
        let max_diff = oracle
            .iter()
            .zip(g2e_mo.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max);
        assert!(max_diff < 1e-10, "strategy {}: diff {}", name, max_diff);
    }
}

#[test]
fn example_config_drives_the_pipeline() {
    let content = std::fs::read_to_string(example_path("h6_chain.yaml")).unwrap();
    let config: Config = serde_yml::from_str::<Config>(&content)
        .unwrap()
        .with_defaults();

    assert!(config.snapshot.ends_with("h6_chain_snapshot.yaml"));
    assert_eq!(config.nocc(), Some(1));
    assert!(strategy_by_name(&config.strategy()).is_some());
    assert!((config.degeneracy_threshold() - 1e-8).abs() < 1e-20);
}

#[test]
fn unconverged_snapshot_fails_fast() {
    let path = example_path("h6_chain_snapshot.yaml");
    let mut snapshot = load_snapshot(path.to_str().unwrap()).unwrap();
    snapshot.converged = false;

    let provider = SnapshotProvider::new(snapshot).unwrap();
    let solution = provider.hf_solution();
    assert!(solution.ensure_converged().is_err());
}
