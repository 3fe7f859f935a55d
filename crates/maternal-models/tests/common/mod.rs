use maternal_core::schema::N_FEATURES;
use ndarray::{Array1, Array2};

/// Three well-separated clusters, one per risk class, 25/20/15 rows.
pub fn clustered() -> (Array2<f64>, Array1<usize>) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (class, count) in [(0_usize, 25_usize), (1, 20), (2, 15)] {
        let c = class as f64;
        for i in 0..count {
            let jitter = (i % 5) as f64;
            let systolic = 100.0 + 30.0 * c + jitter;
            let diastolic = 65.0 + 15.0 * c + (i % 3) as f64;
            rows.extend_from_slice(&[
                20.0 + 10.0 * c + jitter,
                systolic,
                diastolic,
                6.0 + 4.0 * c + 0.1 * (i % 4) as f64,
                98.0 + 0.5 * c,
                70.0 + 8.0 * c + (i % 6) as f64,
                systolic - diastolic,
            ]);
            labels.push(class);
        }
    }
    let n = labels.len();
    let x = Array2::from_shape_vec((n, N_FEATURES), rows).unwrap();
    (x, Array1::from(labels))
}

pub fn accuracy(predicted: &Array1<usize>, truth: &Array1<usize>) -> f64 {
    let correct = predicted
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / truth.len() as f64
}
