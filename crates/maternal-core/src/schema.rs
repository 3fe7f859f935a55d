/// Column names as they appear in the raw dataset header.
pub mod column {
    pub const AGE: &str = "Age";
    pub const SYSTOLIC_BP: &str = "SystolicBP";
    pub const DIASTOLIC_BP: &str = "DiastolicBP";
    pub const BS: &str = "BS";
    pub const BODY_TEMP: &str = "BodyTemp";
    pub const HEART_RATE: &str = "HeartRate";
    pub const RISK_LEVEL: &str = "RiskLevel";

    /// Engineered column, appended after loading.
    pub const PULSE_PRESSURE: &str = "pulse_pressure";
}

/// Every column a raw table must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    column::AGE,
    column::SYSTOLIC_BP,
    column::DIASTOLIC_BP,
    column::BS,
    column::BODY_TEMP,
    column::HEART_RATE,
    column::RISK_LEVEL,
];

/// Raw measurement columns that must coerce to numbers.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    column::AGE,
    column::SYSTOLIC_BP,
    column::DIASTOLIC_BP,
    column::BS,
    column::BODY_TEMP,
    column::HEART_RATE,
];

/// Model input columns, in the exact order used for fitting and prediction.
///
/// Training builds its matrix from these columns and inference builds its
/// row through [`crate::Observation::feature_vector`]; both must agree.
pub const FEATURE_COLUMNS: [&str; 7] = [
    column::AGE,
    column::SYSTOLIC_BP,
    column::DIASTOLIC_BP,
    column::BS,
    column::BODY_TEMP,
    column::HEART_RATE,
    column::PULSE_PRESSURE,
];

/// Number of model input features.
pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

/// Pulse pressure: the difference between systolic and diastolic pressure.
pub fn pulse_pressure(systolic_bp: f64, diastolic_bp: f64) -> f64 {
    systolic_bp - diastolic_bp
}
