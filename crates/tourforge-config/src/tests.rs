//! Tests for engine configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42
        construction = "double_ended_nearest_neighbor"
        improvements = ["three_opt"]

        [exhaustive]
        size_limit = 8

        [generator]
        min_weight = 10.0
        max_weight = 20.0
        sizes = [4, 6]
        graphs_per_size = 2

        [experiment]
        low = 5
        high = 9
        iterations = 3
    "#;

    let config = EngineConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(
        config.construction,
        ConstructionType::DoubleEndedNearestNeighbor
    );
    assert_eq!(config.improvements, vec![ImprovementType::ThreeOpt]);
    assert_eq!(config.exhaustive.size_limit, 8);
    assert_eq!(config.generator.sizes, vec![4, 6]);
    assert_eq!(config.experiment.high, 9);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        construction: nearest_neighbor
        improvements:
          - two_opt
          - node_swap
        batch:
          constructions:
            - multi_fragment
          improvements:
            - node_swap
    "#;

    let config = EngineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.construction, ConstructionType::NearestNeighbor);
    assert_eq!(config.improvements.len(), 2);
    assert_eq!(config.batch.constructions, vec![ConstructionType::MultiFragment]);
    assert_eq!(config.batch.improvements, vec![ImprovementType::NodeSwap]);
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = EngineConfig::from_toml_str(
        r#"
        [generator]
        graphs_per_size = 4
    "#,
    )
    .unwrap();

    assert_eq!(config.generator.graphs_per_size, 4);
    assert_eq!(config.generator.min_weight, 1.0);
    assert_eq!(config.generator.max_weight, 1000.0);
    assert_eq!(config.exhaustive.size_limit, 10);
    assert_eq!(config.batch.constructions.len(), 3);
    assert_eq!(config.experiment.low, 4);
    assert_eq!(config.experiment.high, 100);
}

#[test]
fn test_unknown_algorithm_rejected() {
    let result = EngineConfig::from_toml_str(r#"construction = "christofides""#);
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_random_seed(123)
        .with_construction(ConstructionType::NearestNeighbor)
        .with_improvement(ImprovementType::TwoOpt)
        .with_improvement(ImprovementType::NodeSwap)
        .with_exhaustive_limit(7)
        .with_experiment(4, 12, 5);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.improvements.len(), 2);
    assert_eq!(config.exhaustive.size_limit, 7);
    assert_eq!(config.experiment.iterations, 5);
}

#[test]
fn test_validate_rejects_bad_ranges() {
    let empty_weights = EngineConfig::new().with_weight_range(5.0, 5.0);
    assert!(matches!(empty_weights.validate(), Err(ConfigError::Invalid(_))));

    let negative = EngineConfig::new().with_weight_range(-1.0, 5.0);
    assert!(negative.validate().is_err());

    let backwards = EngineConfig::new().with_experiment(10, 4, 1);
    assert!(backwards.validate().is_err());

    let no_iterations = EngineConfig::new().with_experiment(4, 10, 0);
    assert!(no_iterations.validate().is_err());

    let tiny_limit = EngineConfig::new().with_exhaustive_limit(1);
    assert!(tiny_limit.validate().is_err());

    let mut tiny_size = EngineConfig::new();
    tiny_size.generator.sizes = vec![3, 1];
    assert!(tiny_size.validate().is_err());
}

#[test]
fn test_load_missing_file_falls_back() {
    let config = EngineConfig::load("does/not/exist.toml").unwrap_or_default();
    assert_eq!(config, EngineConfig::default());
    assert!(matches!(
        EngineConfig::load("does/not/exist.yaml"),
        Err(ConfigError::Io(_))
    ));
}
