use maternal_models::error::ModelError;
use maternal_models::estimators::EstimatorConfig;
use maternal_models::registry::available_keys;
use maternal_models::{ModelKey, get_model_spec, model_specs};

#[test]
fn specs_come_in_registry_order() {
    let specs = model_specs(42);
    let keys: Vec<&str> = specs.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(&keys[..5], &["dummy", "logreg", "rf", "extratrees", "mlp"]);
    assert_eq!(keys, available_keys());
    assert_eq!(specs.len(), ModelKey::ALL.len());
}

#[test]
fn only_linear_and_neural_models_are_scaled() {
    let scaled: Vec<&str> = model_specs(0)
        .iter()
        .filter(|s| s.needs_scaling)
        .map(|s| s.key.as_str())
        .collect();
    assert_eq!(scaled, vec!["logreg", "mlp"]);
}

#[test]
fn display_names_match_catalog() {
    let spec = get_model_spec("rf", 42).unwrap();
    assert_eq!(spec.name, "Random Forest");
    assert_eq!(get_model_spec("dummy", 42).unwrap().name, "Dummy (most_frequent)");
    assert_eq!(get_model_spec("mlp", 42).unwrap().name, "MLP (Neural Network)");
}

#[test]
fn seed_flows_into_randomized_estimators() {
    let spec = get_model_spec("extratrees", 7).unwrap();
    let EstimatorConfig::TreeEnsemble(params) = spec.estimator else {
        panic!("extratrees should be a tree ensemble");
    };
    assert_eq!(params.seed, 7);
    assert_eq!(params.n_estimators, 500);
    assert!(!params.bootstrap);
}

#[test]
fn unknown_key_lists_available_models() {
    let err = get_model_spec("svm", 42).unwrap_err();
    match err {
        ModelError::UnknownModel { key, available } => {
            assert_eq!(key, "svm");
            assert!(available.starts_with("dummy, logreg, rf, extratrees, mlp"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn keys_parse_from_their_names() {
    for key in ModelKey::ALL {
        assert_eq!(key.as_str().parse::<ModelKey>().unwrap(), *key);
    }
    assert!("RF".parse::<ModelKey>().is_err());
}
