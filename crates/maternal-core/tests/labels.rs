use maternal_core::risk::{decode, encode};
use maternal_core::schema::{FEATURE_COLUMNS, column};
use maternal_core::{Observation, RiskLevel};

#[test]
fn encoding_follows_fixed_order() {
    assert_eq!(RiskLevel::parse_label("low risk").unwrap().code(), 0);
    assert_eq!(RiskLevel::parse_label("mid risk").unwrap().code(), 1);
    assert_eq!(RiskLevel::parse_label("high risk").unwrap().code(), 2);
}

#[test]
fn encode_decode_round_trips_exact_strings() {
    let labels = ["low risk", "mid risk", "high risk", "mid risk"];
    let levels: Vec<RiskLevel> = labels
        .iter()
        .map(|l| l.parse().unwrap())
        .collect();

    let codes = encode(&levels);
    assert_eq!(codes, vec![0, 1, 2, 1]);

    let decoded = decode(&codes).unwrap();
    let strings: Vec<&str> = decoded.iter().map(|l| l.as_str()).collect();
    assert_eq!(strings, labels);
}

#[test]
fn parse_tolerates_case_and_whitespace() {
    assert_eq!(RiskLevel::parse_label("  HIGH Risk ").unwrap(), RiskLevel::High);
    assert!(RiskLevel::parse_label("severe").is_err());
}

#[test]
fn unknown_code_is_rejected() {
    assert!(RiskLevel::from_code(3).is_err());
    assert!(decode(&[0, 7]).is_err());
}

#[test]
fn feature_vector_matches_feature_columns() {
    let obs = Observation {
        age: 28.0,
        systolic_bp: 110.0,
        diastolic_bp: 70.0,
        bs: 6.0,
        body_temp: 98.0,
        heart_rate: 75.0,
    };

    let row = obs.feature_vector();
    assert_eq!(row.len(), FEATURE_COLUMNS.len());
    assert_eq!(FEATURE_COLUMNS[6], column::PULSE_PRESSURE);
    assert_eq!(row, [28.0, 110.0, 70.0, 6.0, 98.0, 75.0, 40.0]);
}

#[test]
fn observation_uses_dataset_field_names() {
    let json = r#"{"Age":25,"SystolicBP":120,"DiastolicBP":80,"BS":7.0,"BodyTemp":98.6,"HeartRate":72}"#;
    let obs: Observation = serde_json::from_str(json).unwrap();
    assert_eq!(obs.pulse_pressure(), 40.0);
}
