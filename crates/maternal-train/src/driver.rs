//! Train-one and compare-all runs.

use std::fs;
use std::path::{Path, PathBuf};

use maternal_core::{RiskLevel, paths, risk};
use maternal_eval::plots::save_confusion_matrix;
use maternal_eval::{ConfusionMatrix, Metrics, evaluate_classification};
use maternal_models::{ModelSpec, Pipeline, Predictor, get_model_spec, model_specs};
use maternal_tracking::{RunStatus, TrackingSink};
use tracing::{info, warn};

use crate::config::TrainConfig;
use crate::dataset::{SplitData, prepare};
use crate::error::TrainError;
use crate::report::{ComparisonReport, ComparisonRow, ensure_parent};

const EVAL_ARTIFACTS: &str = "eval";
const MODEL_ARTIFACTS: &str = "model";

/// Files written for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifacts {
    pub metrics: PathBuf,
    pub classification_report: PathBuf,
    pub confusion_matrix: PathBuf,
    pub model: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutcome {
    pub model_key: String,
    pub model_name: String,
    pub metrics: Metrics,
    pub classification_report: String,
    pub artifacts: ModelArtifacts,
}

/// Train, evaluate and persist a single model, recording it as one tracked
/// run named after the model key.
pub fn train_one(
    config: &TrainConfig,
    model_key: &str,
    tracker: &mut dyn TrackingSink,
) -> Result<ModelOutcome, TrainError> {
    let seed = config.train.random_state;
    let spec = get_model_spec(model_key, seed)?;

    let run_id = tracker.start_run(spec.key.as_str())?;
    let result = tracked_run(config, &spec, tracker, &run_id);

    let status = if result.is_ok() {
        RunStatus::Completed
    } else {
        RunStatus::Failed
    };
    if let Err(e) = tracker.end_run(&run_id, status) {
        // Keep the training error if there is one; it is the root cause.
        if result.is_ok() {
            return Err(e.into());
        }
        warn!(run_id, error = %e, "failed to close tracking run");
    }
    result
}

fn tracked_run(
    config: &TrainConfig,
    spec: &ModelSpec,
    tracker: &mut dyn TrackingSink,
    run_id: &str,
) -> Result<ModelOutcome, TrainError> {
    tracker.log_param(run_id, "model_key", spec.key.as_str())?;
    tracker.log_param(run_id, "test_size", &config.train.test_size.to_string())?;
    tracker.log_param(run_id, "random_state", &config.train.random_state.to_string())?;
    tracker.log_param(run_id, "needs_scaling", &spec.needs_scaling.to_string())?;
    tracker.log_params(run_id, &spec.estimator.hyperparameters())?;

    let data = prepare(
        &config.data.raw_path,
        config.train.test_size,
        config.train.random_state,
    )?;
    let outcome = fit_and_evaluate(
        spec,
        &data,
        &config.output.report_dir,
        Some(&config.output.model_dir),
    )?;

    let m = &outcome.metrics;
    for (key, value) in [
        ("accuracy", m.accuracy),
        ("f1_macro", m.f1_macro),
        ("f1_weighted", m.f1_weighted),
    ] {
        tracker.log_metric(run_id, key, value, 0)?;
    }

    let artifacts = &outcome.artifacts;
    for path in [
        &artifacts.metrics,
        &artifacts.classification_report,
        &artifacts.confusion_matrix,
    ] {
        tracker.log_artifact(run_id, path, Some(EVAL_ARTIFACTS))?;
    }
    if let Some(model) = &artifacts.model {
        tracker.log_artifact(run_id, model, Some(MODEL_ARTIFACTS))?;
    }

    info!(
        model_key = %spec.key,
        accuracy = m.accuracy,
        f1_macro = m.f1_macro,
        f1_weighted = m.f1_weighted,
        "model trained"
    );
    Ok(outcome)
}

/// Train every registered model on one shared split and rank them.
pub fn compare_all(config: &TrainConfig, save_models: bool) -> Result<ComparisonReport, TrainError> {
    let seed = config.train.random_state;
    let data = prepare(&config.data.raw_path, config.train.test_size, seed)?;
    let report_dir = &config.output.report_dir;
    let model_dir = save_models.then_some(config.output.model_dir.as_path());

    let mut rows = Vec::new();
    for spec in model_specs(seed) {
        info!(model_key = %spec.key, model_name = %spec.name, "training");
        let outcome = fit_and_evaluate(&spec, &data, report_dir, model_dir)?;
        info!(
            model_key = %spec.key,
            accuracy = outcome.metrics.accuracy,
            f1_macro = outcome.metrics.f1_macro,
            f1_weighted = outcome.metrics.f1_weighted,
            "model evaluated"
        );
        rows.push(ComparisonRow::new(
            &outcome.model_key,
            &outcome.model_name,
            &outcome.metrics,
        ));
    }

    let report = ComparisonReport::ranked(rows);
    let csv_path = paths::comparison_csv(report_dir);
    let chart_path = paths::comparison_chart(report_dir);
    report.write_csv(&csv_path)?;
    report.write_json(&paths::comparison_json(report_dir))?;
    report.write_chart(&chart_path)?;
    info!(csv = %csv_path.display(), chart = %chart_path.display(), "comparison saved");

    for (rank, row) in report.top(5).iter().enumerate() {
        info!(
            rank = rank + 1,
            model_key = %row.model_key,
            f1_macro = row.f1_macro,
            accuracy = row.accuracy,
            "top model"
        );
    }
    Ok(report)
}

/// Fit one pipeline on the training side, score it on the test side and
/// write its per-model reports.
fn fit_and_evaluate(
    spec: &ModelSpec,
    data: &SplitData,
    report_dir: &Path,
    model_dir: Option<&Path>,
) -> Result<ModelOutcome, TrainError> {
    let key = spec.key.as_str();
    let pipeline = Pipeline::fit(spec, data.x_train.view(), data.y_train.view())?;
    let predicted = pipeline.predict(data.x_test.view())?;

    let y_true = risk::decode(&data.y_test.to_vec())?;
    let y_pred = risk::decode(&predicted.to_vec())?;
    let eval = evaluate_classification(&y_true, &y_pred, &RiskLevel::ALL)?;

    let metrics_path = paths::metrics(report_dir, key);
    ensure_parent(&metrics_path)?;
    fs::write(&metrics_path, serde_json::to_string_pretty(&eval.metrics)?)
        .map_err(|e| TrainError::io(&metrics_path, e))?;

    let report_path = paths::classification_report(report_dir, key);
    fs::write(&report_path, &eval.classification_report_text)
        .map_err(|e| TrainError::io(&report_path, e))?;

    let cm_path = paths::confusion_matrix(report_dir, key);
    let cm = ConfusionMatrix::from_labels(&y_true, &y_pred, &RiskLevel::ALL)?;
    save_confusion_matrix(&cm, &cm_path)?;

    let model_path = match model_dir {
        Some(dir) => {
            let path = paths::model(dir, key);
            pipeline.save(&path)?;
            Some(path)
        }
        None => None,
    };

    Ok(ModelOutcome {
        model_key: key.to_string(),
        model_name: spec.name.clone(),
        metrics: eval.metrics,
        classification_report: eval.classification_report_text,
        artifacts: ModelArtifacts {
            metrics: metrics_path,
            classification_report: report_path,
            confusion_matrix: cm_path,
            model: model_path,
        },
    })
}
