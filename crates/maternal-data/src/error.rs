use thiserror::Error;

use maternal_core::error::CoreError;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV file not found: {path}")]
    FileNotFound { path: String },

    #[error("loaded table is empty, check the CSV content: {path}")]
    EmptyTable { path: String },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("column '{column}' has {actual} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("row {row}: column '{column}' is not numeric")]
    NonNumeric { row: usize, column: String },

    #[error("row {row}: {source}")]
    Label {
        row: usize,
        #[source]
        source: CoreError,
    },
}
