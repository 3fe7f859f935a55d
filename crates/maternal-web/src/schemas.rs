//! Request shapes and input bounds for the prediction routes.

use std::fmt;

use maternal_core::Observation;
use maternal_core::schema::column;
use serde::{Deserialize, Serialize};

/// Inclusive range accepted for one input field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldBound {
    pub field: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

pub const FIELD_BOUNDS: [FieldBound; 6] = [
    FieldBound { field: column::AGE, label: "Age (years)", min: 10.0, max: 60.0 },
    FieldBound { field: column::SYSTOLIC_BP, label: "Systolic BP (mmHg)", min: 70.0, max: 200.0 },
    FieldBound { field: column::DIASTOLIC_BP, label: "Diastolic BP (mmHg)", min: 40.0, max: 140.0 },
    FieldBound { field: column::BS, label: "Blood sugar (mmol/L)", min: 3.0, max: 30.0 },
    FieldBound { field: column::BODY_TEMP, label: "Body temperature (°F)", min: 95.0, max: 105.0 },
    FieldBound { field: column::HEART_RATE, label: "Heart rate (bpm)", min: 40.0, max: 200.0 },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validation_message(errors: &[FieldError]) -> String {
    let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("Validation failed: {}", joined.join("; "))
}

fn field_values(observation: &Observation) -> [f64; 6] {
    [
        observation.age,
        observation.systolic_bp,
        observation.diastolic_bp,
        observation.bs,
        observation.body_temp,
        observation.heart_rate,
    ]
}

/// Check every field against [`FIELD_BOUNDS`], collecting all violations.
pub fn validate(observation: &Observation) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = FIELD_BOUNDS
        .iter()
        .zip(field_values(observation))
        .filter_map(|(bound, value)| check_bound(bound, value))
        .collect();
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_bound(bound: &FieldBound, value: f64) -> Option<FieldError> {
    let message = if !value.is_finite() {
        "Input should be a finite number".to_string()
    } else if value < bound.min {
        format!("Input should be greater than or equal to {}", bound.min)
    } else if value > bound.max {
        format!("Input should be less than or equal to {}", bound.max)
    } else {
        return None;
    };
    Some(FieldError {
        field: bound.field.to_string(),
        message,
    })
}

/// The HTML form as submitted. Values stay text so unparsable input can be
/// reported next to the out-of-range kind.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PredictForm {
    #[serde(rename = "Age", default)]
    pub age: String,
    #[serde(rename = "SystolicBP", default)]
    pub systolic_bp: String,
    #[serde(rename = "DiastolicBP", default)]
    pub diastolic_bp: String,
    #[serde(rename = "BS", default)]
    pub bs: String,
    #[serde(rename = "BodyTemp", default)]
    pub body_temp: String,
    #[serde(rename = "HeartRate", default)]
    pub heart_rate: String,
}

impl PredictForm {
    fn raw_values(&self) -> [&str; 6] {
        [
            self.age.as_str(),
            self.systolic_bp.as_str(),
            self.diastolic_bp.as_str(),
            self.bs.as_str(),
            self.body_temp.as_str(),
            self.heart_rate.as_str(),
        ]
    }

    /// Parse and bound-check every field.
    pub fn to_observation(&self) -> Result<Observation, Vec<FieldError>> {
        let mut values = [0.0; 6];
        let mut errors = Vec::new();

        for ((bound, raw), slot) in FIELD_BOUNDS.iter().zip(self.raw_values()).zip(&mut values) {
            let raw = raw.trim();
            let parsed = if raw.is_empty() {
                Err("Field required")
            } else {
                raw.parse::<f64>()
                    .map_err(|_| "Input should be a valid number, unable to parse string as a number")
            };
            match parsed {
                Ok(value) => match check_bound(bound, value) {
                    Some(error) => errors.push(error),
                    None => *slot = value,
                },
                Err(message) => errors.push(FieldError {
                    field: bound.field.to_string(),
                    message: message.to_string(),
                }),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        let [age, systolic_bp, diastolic_bp, bs, body_temp, heart_rate] = values;
        Ok(Observation {
            age,
            systolic_bp,
            diastolic_bp,
            bs,
            body_temp,
            heart_rate,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub risk_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> Observation {
        Observation {
            age: 25.0,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            bs: 7.0,
            body_temp: 98.0,
            heart_rate: 70.0,
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut obs = observation();
        obs.age = 10.0;
        obs.heart_rate = 200.0;
        assert!(validate(&obs).is_ok());
    }

    #[test]
    fn every_violation_is_reported() {
        let mut obs = observation();
        obs.age = 9.5;
        obs.body_temp = 106.0;
        let errors = validate(&obs).unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "Validation failed: Age: Input should be greater than or equal to 10; \
             BodyTemp: Input should be less than or equal to 105"
        );
    }

    #[test]
    fn form_reports_unparsable_and_missing_values() {
        let form = PredictForm {
            age: "abc".into(),
            systolic_bp: "120".into(),
            diastolic_bp: "80".into(),
            bs: "".into(),
            body_temp: "98".into(),
            heart_rate: "70".into(),
        };
        let errors = form.to_observation().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Age", "BS"]);
        assert_eq!(errors[1].message, "Field required");
    }

    #[test]
    fn form_parses_into_observation() {
        let form = PredictForm {
            age: " 25 ".into(),
            systolic_bp: "120".into(),
            diastolic_bp: "80".into(),
            bs: "7".into(),
            body_temp: "98".into(),
            heart_rate: "70".into(),
        };
        assert_eq!(form.to_observation().unwrap(), observation());
    }
}
