use maternal_core::Observation;
use maternal_core::schema::N_FEATURES;
use maternal_models::{Pipeline, get_model_spec};
use maternal_web::inference::{InferenceError, InferenceService};
use ndarray::{Array1, Array2};

fn observation() -> Observation {
    Observation {
        age: 30.0,
        systolic_bp: 130.0,
        diastolic_bp: 85.0,
        bs: 8.0,
        body_temp: 98.6,
        heart_rate: 76.0,
    }
}

/// A majority-class pipeline that always answers "Mid".
fn mid_pipeline() -> Pipeline {
    let spec = get_model_spec("dummy", 42).unwrap();
    let x = Array2::from_shape_fn((6, N_FEATURES), |(i, j)| (i * N_FEATURES + j) as f64);
    let y = Array1::from(vec![1, 1, 1, 1, 0, 2]);
    Pipeline::fit(&spec, x.view(), y.view()).unwrap()
}

#[tokio::test]
async fn loads_model_from_disk_on_first_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("dummy.json");
    mid_pipeline().save(&path).unwrap();

    let service = InferenceService::from_path(&path);
    assert!(!service.is_loaded());
    assert_eq!(service.predict(&observation()).await.unwrap(), "Mid");
    assert!(service.is_loaded());

    // Loaded once: removing the file does not affect later predictions.
    std::fs::remove_file(&path).unwrap();
    assert_eq!(service.predict(&observation()).await.unwrap(), "Mid");
}

#[tokio::test]
async fn load_failures_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rf.json");
    let service = InferenceService::from_path(&path);

    let err = service.predict(&observation()).await.unwrap_err();
    assert!(matches!(err, InferenceError::Load { .. }));
    assert!(err.to_string().contains("rf.json"));
    assert!(!service.is_loaded());

    mid_pipeline().save(&path).unwrap();
    assert_eq!(service.predict(&observation()).await.unwrap(), "Mid");
}
