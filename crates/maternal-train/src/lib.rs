//! maternal-train
//!
//! The training and comparison driver behind the `maternal-risk` CLI: load
//! and validate the dataset, engineer features, split once, then fit,
//! evaluate and report each candidate model.

pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod report;
pub mod split;

pub use config::TrainConfig;
pub use driver::{ModelOutcome, compare_all, train_one};
pub use error::TrainError;
pub use report::{ComparisonReport, ComparisonRow};
