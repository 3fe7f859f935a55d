use std::collections::BTreeMap;

use maternal_tracking::{LocalTracker, RunStatus, TrackingError, TrackingSink};

#[test]
fn completed_run_is_persisted_with_params_and_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = LocalTracker::new(dir.path(), "maternal_risk");

    let run_id = tracker.start_run("rf").unwrap();
    tracker.log_param(&run_id, "model_key", "rf").unwrap();
    let mut params = BTreeMap::new();
    params.insert("test_size".to_string(), "0.2".to_string());
    params.insert("random_state".to_string(), "42".to_string());
    tracker.log_params(&run_id, &params).unwrap();
    tracker.log_metric(&run_id, "f1_macro", 0.81, 0).unwrap();
    tracker.end_run(&run_id, RunStatus::Completed).unwrap();

    let run_file = dir
        .path()
        .join("maternal_risk")
        .join(&run_id)
        .join("run.json");
    assert!(run_file.is_file());

    let run = tracker.load_run(&run_id).unwrap();
    assert_eq!(run.run_name, "rf");
    assert_eq!(run.experiment, "maternal_risk");
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.params["model_key"], "rf");
    assert_eq!(run.params["random_state"], "42");
    assert_eq!(run.latest_metric("f1_macro"), Some(0.81));
    assert!(run.ended_at.is_some());
}

#[test]
fn started_run_is_visible_before_it_ends() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = LocalTracker::new(dir.path(), "exp");
    let run_id = tracker.start_run("logreg").unwrap();

    let run = tracker.load_run(&run_id).unwrap();
    assert_eq!(run.status, RunStatus::Running);
    assert!(run.ended_at.is_none());
}

#[test]
fn artifacts_are_copied_under_their_path() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("metrics_rf.json");
    std::fs::write(&source, "{}").unwrap();

    let mut tracker = LocalTracker::new(dir.path().join("mlruns"), "exp");
    let run_id = tracker.start_run("rf").unwrap();
    tracker.log_artifact(&run_id, &source, Some("reports")).unwrap();
    tracker.log_artifact(&run_id, &source, None).unwrap();
    tracker.end_run(&run_id, RunStatus::Completed).unwrap();

    let artifacts = tracker.run_dir(&run_id).join("artifacts");
    assert!(artifacts.join("reports").join("metrics_rf.json").is_file());
    assert!(artifacts.join("metrics_rf.json").is_file());

    let run = tracker.load_run(&run_id).unwrap();
    assert_eq!(
        run.artifacts,
        vec!["reports/metrics_rf.json".to_string(), "metrics_rf.json".to_string()]
    );
}

#[test]
fn missing_artifact_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = LocalTracker::new(dir.path(), "exp");
    let run_id = tracker.start_run("rf").unwrap();
    let err = tracker
        .log_artifact(&run_id, &dir.path().join("nope.txt"), None)
        .unwrap_err();
    assert!(matches!(err, TrackingError::ArtifactNotFound(_)));
}

#[test]
fn ended_run_rejects_further_logging() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = LocalTracker::new(dir.path(), "exp");
    let run_id = tracker.start_run("dummy").unwrap();
    tracker.end_run(&run_id, RunStatus::Failed).unwrap();

    assert!(matches!(
        tracker.log_metric(&run_id, "accuracy", 0.5, 0),
        Err(TrackingError::RunNotActive(_))
    ));
    assert!(matches!(
        tracker.end_run(&run_id, RunStatus::Completed),
        Err(TrackingError::RunNotActive(_))
    ));
    assert_eq!(tracker.load_run(&run_id).unwrap().status, RunStatus::Failed);
}

#[test]
fn list_runs_returns_every_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = LocalTracker::new(dir.path(), "exp");
    assert!(tracker.list_runs().unwrap().is_empty());

    for name in ["dummy", "rf"] {
        let id = tracker.start_run(name).unwrap();
        tracker.end_run(&id, RunStatus::Completed).unwrap();
    }
    let names: Vec<String> = tracker
        .list_runs()
        .unwrap()
        .into_iter()
        .map(|r| r.run_name)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"dummy".to_string()));
    assert!(names.contains(&"rf".to_string()));

    assert!(matches!(
        tracker.load_run("missing"),
        Err(TrackingError::RunNotFound(_))
    ));
}
