use std::fmt::Write as _;
use std::path::Path;

use maternal_train::TrainConfig;
use maternal_train::config::{DataConfig, OutputConfig, SplitConfig, TrackingConfig};

pub const HEADER: &str = "Age,SystolicBP,DiastolicBP,BS,BodyTemp,HeartRate,RiskLevel";

/// A separable dataset with `per_class` rows of each risk level. Labels use
/// mixed case and padding, as the raw file does.
pub fn synthetic_csv(per_class: usize) -> String {
    let mut csv = format!("{HEADER}\n");
    let labels = ["low risk", " Mid Risk", "HIGH RISK "];
    for (class, label) in labels.iter().enumerate() {
        let c = class as f64;
        for i in 0..per_class {
            let j = (i % 5) as f64;
            writeln!(
                csv,
                "{},{},{},{:.1},{:.1},{},{}",
                20.0 + 8.0 * c + j,
                105.0 + 20.0 * c + j,
                70.0 + 10.0 * c + (i % 3) as f64,
                6.0 + 3.0 * c + 0.1 * j,
                98.0 + 0.4 * c,
                70.0 + 6.0 * c + j,
                label
            )
            .unwrap();
        }
    }
    csv
}

pub fn config_in(root: &Path, csv: &str) -> TrainConfig {
    let raw_path = root.join("data.csv");
    std::fs::write(&raw_path, csv).unwrap();
    TrainConfig {
        data: DataConfig { raw_path },
        train: SplitConfig {
            test_size: 0.25,
            random_state: 42,
        },
        output: OutputConfig {
            model_dir: root.join("models"),
            report_dir: root.join("reports"),
        },
        tracking: TrackingConfig {
            dir: root.join("mlruns"),
            experiment: "maternal_risk".to_string(),
        },
    }
}
