use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maternal risk category, the classification target.
///
/// Class codes follow the fixed order low, mid, high. Estimators only ever
/// see the codes; reports and the web layer see the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "low risk")]
    Low,
    #[serde(rename = "mid risk")]
    Mid,
    #[serde(rename = "high risk")]
    High,
}

impl RiskLevel {
    /// All levels in class-code order.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Mid, RiskLevel::High];

    /// Number of classes.
    pub const COUNT: usize = Self::ALL.len();

    /// Normalized dataset label (e.g. "mid risk").
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low risk",
            RiskLevel::Mid => "mid risk",
            RiskLevel::High => "high risk",
        }
    }

    /// Short label shown to end users.
    pub fn display_name(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Mid => "Mid",
            RiskLevel::High => "High",
        }
    }

    pub fn code(self) -> usize {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Mid => 1,
            RiskLevel::High => 2,
        }
    }

    pub fn from_code(code: usize) -> Result<Self, CoreError> {
        Self::ALL
            .get(code)
            .copied()
            .ok_or(CoreError::UnknownClassCode(code))
    }

    /// Parse a raw label, tolerating surrounding whitespace and case.
    pub fn parse_label(raw: &str) -> Result<Self, CoreError> {
        let normalized = normalize_label(raw);
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or(CoreError::UnknownRiskLevel(raw.to_string()))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

/// Trim and lowercase a raw label.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Encode labels to class codes.
pub fn encode(levels: &[RiskLevel]) -> Vec<usize> {
    levels.iter().map(|l| l.code()).collect()
}

/// Decode class codes back to labels.
pub fn decode(codes: &[usize]) -> Result<Vec<RiskLevel>, CoreError> {
    codes.iter().map(|&c| RiskLevel::from_code(c)).collect()
}
