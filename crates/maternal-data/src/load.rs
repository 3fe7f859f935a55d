use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::DataError;
use crate::table::Table;

/// Load the maternal health dataset from a CSV file.
///
/// Fails if the file is missing or the table has no rows.
pub fn load_data(csv_path: impl AsRef<Path>) -> Result<Table, DataError> {
    let csv_path = csv_path.as_ref();
    let shown = std::path::absolute(csv_path)
        .unwrap_or_else(|_| csv_path.to_path_buf())
        .display()
        .to_string();

    if !csv_path.exists() {
        return Err(DataError::FileNotFound { path: shown });
    }

    let file = File::open(csv_path)?;
    let table = Table::from_csv_reader(BufReader::new(file))?;

    if table.is_empty() {
        return Err(DataError::EmptyTable { path: shown });
    }

    tracing::info!(
        path = %csv_path.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "dataset loaded"
    );
    Ok(table)
}
