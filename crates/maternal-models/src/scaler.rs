use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Per-feature standardization: `(x - mean) / scale`.
///
/// `scale` is the population standard deviation; constant features get a
/// scale of 1 so they map to zero instead of NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn fit(x: ArrayView2<'_, f64>) -> Result<Self, ModelError> {
        let mean = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyTrainingSet)?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 && s.is_finite() { s } else { 1.0 });
        Ok(StandardScaler { mean, scale })
    }

    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        if x.ncols() != self.mean.len() {
            return Err(ModelError::ShapeMismatch {
                what: "feature columns",
                expected: self.mean.len(),
                actual: x.ncols(),
            });
        }
        Ok((&x - &self.mean) / &self.scale)
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standardizes_columns() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();
        assert_eq!(scaler.mean(), &array![2.0, 10.0]);
        assert_eq!(scaler.scale(), &array![1.0, 1.0]);

        let scaled = scaler.transform(x.view()).unwrap();
        assert_eq!(scaled, array![[-1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn rejects_wrong_width() {
        let scaler = StandardScaler::fit(array![[1.0, 2.0]].view()).unwrap();
        let err = scaler.transform(array![[1.0]].view()).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { .. }));
    }
}
