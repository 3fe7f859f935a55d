use serde::{Deserialize, Serialize};

use crate::schema::{self, N_FEATURES};

/// One patient's raw measurements, as submitted for a prediction.
///
/// Field names serialize to the dataset's column names so the same JSON
/// shape works for the API and for the CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "SystolicBP")]
    pub systolic_bp: f64,
    #[serde(rename = "DiastolicBP")]
    pub diastolic_bp: f64,
    #[serde(rename = "BS")]
    pub bs: f64,
    #[serde(rename = "BodyTemp")]
    pub body_temp: f64,
    #[serde(rename = "HeartRate")]
    pub heart_rate: f64,
}

impl Observation {
    pub fn pulse_pressure(&self) -> f64 {
        schema::pulse_pressure(self.systolic_bp, self.diastolic_bp)
    }

    /// Model input row in [`schema::FEATURE_COLUMNS`] order.
    pub fn feature_vector(&self) -> [f64; N_FEATURES] {
        [
            self.age,
            self.systolic_bp,
            self.diastolic_bp,
            self.bs,
            self.body_temp,
            self.heart_rate,
            self.pulse_pressure(),
        ]
    }
}
