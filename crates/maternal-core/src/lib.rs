//! maternal-core
//!
//! Shared vocabulary of the maternal risk system: dataset column names, the
//! risk label encoding, the feature vector layout and artifact path
//! conventions. No ML or I/O dependency.

pub mod error;
pub mod observation;
pub mod paths;
pub mod risk;
pub mod schema;

pub use observation::Observation;
pub use risk::RiskLevel;
