use maternal_train::{ComparisonReport, ComparisonRow};

fn row(key: &str, f1_macro: f64) -> ComparisonRow {
    ComparisonRow {
        model_key: key.to_string(),
        model_name: key.to_uppercase(),
        accuracy: 0.5,
        f1_macro,
        f1_weighted: 0.5,
    }
}

#[test]
fn rows_sorted_by_descending_macro_f1() {
    let report = ComparisonReport::ranked(vec![
        row("dummy", 0.2),
        row("rf", 0.9),
        row("logreg", 0.7),
        row("mlp", 0.8),
    ]);
    let keys: Vec<&str> = report.rows().iter().map(|r| r.model_key.as_str()).collect();
    assert_eq!(keys, vec!["rf", "mlp", "logreg", "dummy"]);
    assert_eq!(report.best().map(|r| r.model_key.as_str()), Some("rf"));
    assert_eq!(report.top(2).len(), 2);
    assert_eq!(report.top(10).len(), 4);
}

#[test]
fn ties_keep_registry_order() {
    let report = ComparisonReport::ranked(vec![
        row("rf", 0.9),
        row("extratrees", 0.9),
        row("dummy", 0.1),
    ]);
    let keys: Vec<&str> = report.rows().iter().map(|r| r.model_key.as_str()).collect();
    assert_eq!(keys, vec!["rf", "extratrees", "dummy"]);
}

#[test]
fn csv_has_one_line_per_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("model_comparison.csv");
    let report = ComparisonReport::ranked(vec![row("rf", 0.9), row("dummy", 0.2)]);
    report.write_csv(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "rf,RF,0.5,0.9,0.5");
}
