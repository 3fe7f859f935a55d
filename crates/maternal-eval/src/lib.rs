//! maternal-eval
//!
//! Classification metrics, the text classification report, confusion
//! matrices and the SVG charts written next to each training run.

pub mod confusion;
pub mod error;
pub mod metrics;
pub mod plots;

pub use confusion::ConfusionMatrix;
pub use error::EvalError;
pub use metrics::{EvalResult, Metrics, evaluate_classification};
