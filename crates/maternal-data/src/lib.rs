//! maternal-data
//!
//! Tabular dataset handling: CSV loading into a typed table, schema and range
//! validation, and feature engineering. Produces the labeled feature rows the
//! training driver consumes.

pub mod error;
pub mod features;
pub mod load;
pub mod table;
pub mod validate;

pub use error::DataError;
pub use table::{Cell, Column, Table};
