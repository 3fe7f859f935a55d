//! Schema and value sanity checks for the raw dataset.
//!
//! This is engineering validation to catch broken data early, not medical
//! validation. A passing table is structurally usable for training; nothing
//! more is claimed about the values.

use std::collections::BTreeSet;

use serde::Serialize;

use maternal_core::RiskLevel;
use maternal_core::risk::normalize_label;
use maternal_core::schema::{NUMERIC_COLUMNS, REQUIRED_COLUMNS, column};

use crate::table::Table;

/// Outcome of [`validate_schema`]. `ok` holds iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    ok: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    NonNegative,
    Positive,
}

/// Range rules in the order their messages are reported.
const RANGE_RULES: [(&str, Bound); 6] = [
    (column::AGE, Bound::NonNegative),
    (column::SYSTOLIC_BP, Bound::Positive),
    (column::DIASTOLIC_BP, Bound::Positive),
    (column::HEART_RATE, Bound::Positive),
    (column::BODY_TEMP, Bound::Positive),
    (column::BS, Bound::Positive),
];

/// Validate required columns, nulls, numeric coercibility, value ranges and
/// the target label set.
///
/// Every failing rule contributes one message; the only early return is for
/// missing columns, since every later rule reads them.
pub fn validate_schema(table: &Table) -> ValidationResult {
    let mut errors = Vec::new();

    let missing = missing_columns(table, &REQUIRED_COLUMNS);
    if !missing.is_empty() {
        errors.push(format!(
            "Missing required columns: {}",
            format_list(&missing)
        ));
        return ValidationResult::from_errors(errors);
    }

    let null_counts: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter_map(|name| {
            let nulls = table.column(name)?.null_count();
            (nulls > 0).then(|| format!("'{name}': {nulls}"))
        })
        .collect();
    if !null_counts.is_empty() {
        errors.push(format!("Null values found: {{{}}}", null_counts.join(", ")));
    }

    for name in NUMERIC_COLUMNS {
        if let Some(col) = table.column(name) {
            let bad = col.non_numeric_count();
            if bad > 0 {
                errors.push(format!("Column '{name}' has {bad} non-numeric values."));
            }
        }
    }

    for (name, bound) in RANGE_RULES {
        let Some(col) = table.column(name) else {
            continue;
        };
        let violated = match bound {
            Bound::NonNegative => col.numbers().any(|v| v < 0.0),
            Bound::Positive => col.numbers().any(|v| v <= 0.0),
        };
        if violated {
            errors.push(match bound {
                Bound::NonNegative => format!("{name} has negative values."),
                Bound::Positive => format!("{name} has non-positive values."),
            });
        }
    }

    if let Some(col) = table.column(column::RISK_LEVEL) {
        let invalid: BTreeSet<String> = col
            .cells
            .iter()
            .filter_map(|cell| cell.as_text())
            .map(|raw| normalize_label(&raw))
            .filter(|label| RiskLevel::parse_label(label).is_err())
            .collect();
        if !invalid.is_empty() {
            let invalid: Vec<String> = invalid.into_iter().collect();
            errors.push(format!(
                "Invalid RiskLevel values found: {}",
                format_list(&invalid)
            ));
        }
    }

    let result = ValidationResult::from_errors(errors);
    if result.ok() {
        tracing::debug!(rows = table.n_rows(), "schema validation passed");
    } else {
        tracing::warn!(errors = result.errors().len(), "schema validation failed");
    }
    result
}

/// Required columns absent from the table, sorted by name.
pub fn missing_columns(table: &Table, required: &[&str]) -> Vec<String> {
    let present: BTreeSet<&str> = table.column_names().into_iter().collect();
    let missing: BTreeSet<&str> = required
        .iter()
        .copied()
        .filter(|name| !present.contains(name))
        .collect();
    missing.into_iter().map(String::from).collect()
}

fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}
