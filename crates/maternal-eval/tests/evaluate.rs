use maternal_core::RiskLevel;
use maternal_core::RiskLevel::{High, Low, Mid};
use maternal_eval::plots::{save_bar_chart, save_confusion_matrix};
use maternal_eval::{ConfusionMatrix, EvalError, evaluate_classification};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn perfect_predictions_score_one() {
    let y = [Low, Mid, High, Low];
    let result = evaluate_classification(&y, &y, &RiskLevel::ALL).unwrap();
    assert_eq!(result.metrics.accuracy, 1.0);
    assert_eq!(result.metrics.f1_macro, 1.0);
    assert_eq!(result.metrics.f1_weighted, 1.0);
}

#[test]
fn matches_reference_scores() {
    // accuracy 0.6, f1_macro 2/3, f1_weighted 0.6
    let y_true = [Low, Mid, Low, High, Mid];
    let y_pred = [Low, Mid, Mid, High, Low];
    let m = evaluate_classification(&y_true, &y_pred, &RiskLevel::ALL)
        .unwrap()
        .metrics;
    assert!(close(m.accuracy, 0.6));
    assert!(close(m.f1_macro, 2.0 / 3.0));
    assert!(close(m.f1_weighted, 0.6));
}

#[test]
fn averages_skip_labels_never_seen() {
    // High never appears, so macro-F1 averages over Low and Mid only.
    let y_true = [Low, Low, Mid, Mid];
    let y_pred = [Low, Mid, Mid, Mid];
    let m = evaluate_classification(&y_true, &y_pred, &RiskLevel::ALL)
        .unwrap()
        .metrics;
    let f1_low = 2.0 / 3.0;
    let f1_mid = 0.8;
    assert!(close(m.f1_macro, (f1_low + f1_mid) / 2.0));
}

#[test]
fn report_lists_every_requested_label() {
    let y_true = [Low, Low, Mid];
    let y_pred = [Low, Mid, Mid];
    let report = evaluate_classification(&y_true, &y_pred, &RiskLevel::ALL)
        .unwrap()
        .classification_report_text;

    let lines: Vec<&str> = report.lines().collect();
    assert!(lines[2].trim_start().starts_with("low risk"));
    assert!(lines[3].trim_start().starts_with("mid risk"));
    assert_eq!(
        lines[4],
        "   high risk       0.00      0.00      0.00         0"
    );
    assert!(report.contains("    accuracy                           0.67         3"));
    assert!(report.contains("   macro avg"));
    assert!(report.ends_with('\n'));
}

#[test]
fn length_mismatch_and_empty_are_errors() {
    assert!(matches!(
        evaluate_classification(&[Low], &[Low, Mid], &RiskLevel::ALL),
        Err(EvalError::LengthMismatch { expected: 1, actual: 2 })
    ));
    let empty: [RiskLevel; 0] = [];
    assert!(matches!(
        evaluate_classification(&empty, &empty, &RiskLevel::ALL),
        Err(EvalError::Empty)
    ));
}

#[test]
fn confusion_matrix_rows_are_true_labels() {
    let y_true = [Low, Low, Mid, High, High];
    let y_pred = [Low, Mid, Mid, High, Low];
    let cm = ConfusionMatrix::from_labels(&y_true, &y_pred, &RiskLevel::ALL).unwrap();

    assert_eq!(cm.labels(), ["low risk", "mid risk", "high risk"]);
    assert_eq!(cm.rows(), [vec![1, 1, 0], vec![0, 1, 0], vec![1, 0, 1]]);
    assert_eq!(cm.get(2, 0), 1);
    assert_eq!(cm.total(), 5);
}

#[test]
fn charts_are_written_as_svg() {
    let dir = tempfile::tempdir().unwrap();
    let y_true = [Low, Mid, High, High];
    let y_pred = [Low, Mid, High, Mid];
    let cm = ConfusionMatrix::from_labels(&y_true, &y_pred, &RiskLevel::ALL).unwrap();

    let cm_path = dir.path().join("figures").join("confusion_matrix_rf.svg");
    save_confusion_matrix(&cm, &cm_path).unwrap();
    let svg = std::fs::read_to_string(&cm_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Predicted label"));
    assert!(svg.contains("True label"));

    let bar_path = dir.path().join("figures").join("model_f1_macro.svg");
    let bars = vec![("rf".to_string(), 0.91), ("dummy".to_string(), 0.2)];
    save_bar_chart(&bars, "Model Comparison (Macro F1)", "f1_macro", &bar_path).unwrap();
    let svg = std::fs::read_to_string(&bar_path).unwrap();
    assert!(svg.contains("Model Comparison (Macro F1)"));
    assert!(svg.contains("dummy"));
}

#[test]
fn empty_bar_chart_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = save_bar_chart(&[], "t", "y", &dir.path().join("x.svg")).unwrap_err();
    assert!(matches!(err, EvalError::Empty));
}
