//! Tests for configuration defaults, builders, and JSON loading.

use tsp_hill_climbing::config::Config;
use tsp_hill_climbing::distance::Precision;
use tsp_hill_climbing::local_search::SearchPolicy;

#[test]
fn test_defaults() {
    let config = Config::new();

    assert_eq!(config.iterations, 2000);
    assert_eq!(config.rounds, 5);
    assert_eq!(config.policy, SearchPolicy::ExhaustiveBest);
    assert_eq!(config.precision, Precision::Exact);
    assert_eq!(config.seed, None);
    assert!(!config.parallel);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = Config::new()
        .with_iterations(10)
        .with_rounds(2)
        .with_policy(SearchPolicy::FirstImprovement)
        .with_precision(Precision::TruncatedKm)
        .with_seed(9)
        .with_parallel(true);

    assert_eq!(config.iterations, 10);
    assert_eq!(config.rounds, 2);
    assert_eq!(config.policy, SearchPolicy::FirstImprovement);
    assert_eq!(config.precision, Precision::TruncatedKm);
    assert_eq!(config.seed, Some(9));
    assert!(config.parallel);
}

#[test]
fn test_validate_rejects_empty_runs() {
    assert!(Config::new().with_iterations(0).validate().is_err());
    assert!(Config::new().with_rounds(0).validate().is_err());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let json = r#"{
        "iterations": 300,
        "policy": { "RandomizedSample": { "sample_size": 50 } },
        "precision": "TruncatedKm"
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.iterations, 300);
    assert_eq!(config.rounds, 5);
    assert_eq!(config.policy, SearchPolicy::RandomizedSample { sample_size: 50 });
    assert_eq!(config.precision, Precision::TruncatedKm);
}

#[test]
fn test_json_round_trip() {
    let config = Config::new()
        .with_policy(SearchPolicy::randomized_sample())
        .with_seed(77);

    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
