mod common;

use maternal_models::Pipeline;
use maternal_tracking::{LocalTracker, RunStatus};
use maternal_train::{ComparisonRow, TrainError, compare_all, train_one};

#[test]
fn compare_writes_ranked_report_and_figures() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config_in(dir.path(), &common::synthetic_csv(24));

    let report = compare_all(&config, false).unwrap();
    let rows = report.rows();
    assert_eq!(rows.len(), maternal_models::ModelKey::ALL.len());
    assert!(rows.windows(2).all(|w| w[0].f1_macro >= w[1].f1_macro));

    let reports = dir.path().join("reports");
    for name in ["model_comparison.csv", "model_comparison.json"] {
        assert!(reports.join(name).is_file(), "{name} missing");
    }
    assert!(reports.join("figures").join("model_f1_macro.svg").is_file());
    for row in rows {
        let key = &row.model_key;
        assert!(reports.join(format!("metrics_{key}.json")).is_file());
        assert!(reports.join(format!("classification_report_{key}.txt")).is_file());
        assert!(reports
            .join("figures")
            .join(format!("confusion_matrix_{key}.svg"))
            .is_file());
    }
    assert!(!dir.path().join("models").exists());

    let json = std::fs::read_to_string(reports.join("model_comparison.json")).unwrap();
    let parsed: Vec<ComparisonRow> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, rows);

    let csv = std::fs::read_to_string(reports.join("model_comparison.csv")).unwrap();
    assert!(csv.starts_with("model_key,model_name,accuracy,f1_macro,f1_weighted\n"));
}

#[test]
fn compare_can_save_every_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config_in(dir.path(), &common::synthetic_csv(12));
    let report = compare_all(&config, true).unwrap();
    for row in report.rows() {
        let path = dir.path().join("models").join(format!("{}.json", row.model_key));
        assert!(path.is_file(), "{} missing", path.display());
    }
}

#[test]
fn train_one_saves_model_and_completes_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config_in(dir.path(), &common::synthetic_csv(24));
    let mut tracker = LocalTracker::new(&config.tracking.dir, &config.tracking.experiment);

    let outcome = train_one(&config, "rf", &mut tracker).unwrap();
    assert!(outcome.metrics.f1_macro > 0.9);

    let model_path = dir.path().join("models").join("rf.json");
    assert_eq!(outcome.artifacts.model.as_deref(), Some(model_path.as_path()));
    let pipeline = Pipeline::load(&model_path).unwrap();
    assert_eq!(pipeline.model_key().as_str(), "rf");

    let runs = tracker.list_runs().unwrap();
    assert_eq!(runs.len(), 1);
    let run = &runs[0];
    assert_eq!(run.run_name, "rf");
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.params["model_key"], "rf");
    assert_eq!(run.params["test_size"], "0.25");
    assert_eq!(run.params["random_state"], "42");
    assert_eq!(run.params["needs_scaling"], "false");
    assert_eq!(run.params["n_estimators"], "300");
    assert_eq!(run.latest_metric("f1_macro"), Some(outcome.metrics.f1_macro));
    assert!(run.artifacts.contains(&"eval/metrics_rf.json".to_string()));
    assert!(run.artifacts.contains(&"model/rf.json".to_string()));
}

#[test]
fn unknown_model_fails_before_any_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config_in(dir.path(), &common::synthetic_csv(6));
    let mut tracker = LocalTracker::new(&config.tracking.dir, &config.tracking.experiment);

    let err = train_one(&config, "svm", &mut tracker).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("svm"));
    assert!(message.contains("dummy, logreg, rf, extratrees, mlp"));
    assert!(tracker.list_runs().unwrap().is_empty());
}

#[test]
fn invalid_data_aborts_with_every_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut csv = common::synthetic_csv(6);
    csv.push_str("-3,120,80,7.0,98.0,70,very high\n");
    let config = common::config_in(dir.path(), &csv);

    let err = compare_all(&config, false).unwrap_err();
    match err {
        TrainError::Validation(errors) => {
            assert_eq!(
                errors,
                vec![
                    "Age has negative values.".to_string(),
                    "Invalid RiskLevel values found: ['very high']".to_string(),
                ]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn failed_training_marks_run_failed() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config_in(dir.path(), &format!("{}\n", common::HEADER));
    let mut tracker = LocalTracker::new(&config.tracking.dir, &config.tracking.experiment);

    assert!(train_one(&config, "dummy", &mut tracker).is_err());
    let runs = tracker.list_runs().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].status, RunStatus::Failed);
}
