use std::collections::HashSet;
use std::fmt;
use std::io::Read;

use crate::error::DataError;

/// Tokens read as missing values, in addition to the empty cell.
const NULL_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

/// A single table cell, typed on load.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Type a raw CSV field: missing-value tokens become `Null`, anything that
    /// parses as a float becomes `Number`, the rest stays `Text` verbatim.
    pub fn parse(raw: &str) -> Cell {
        if raw.is_empty() || NULL_TOKENS.contains(&raw) {
            return Cell::Null;
        }
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_nan() => Cell::Null,
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// String form of a non-null cell.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(value) => Some(value.to_string()),
            Cell::Text(text) => Some(text.clone()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_null()).count()
    }

    /// Cells that do not coerce to a number, nulls included.
    pub fn non_numeric_count(&self) -> usize {
        self.cells.iter().filter(|c| c.as_number().is_none()).count()
    }

    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(Cell::as_number)
    }
}

/// Column-oriented table with typed cells. Every column has the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, DataError> {
        let n_rows = columns.first().map_or(0, |c| c.cells.len());
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DataError::DuplicateColumn(column.name.clone()));
            }
            if column.cells.len() != n_rows {
                return Err(DataError::ColumnLength {
                    column: column.name.clone(),
                    expected: n_rows,
                    actual: column.cells.len(),
                });
            }
        }
        Ok(Self { columns, n_rows })
    }

    /// Read a headed CSV document. Ragged rows are a parse error.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut columns: Vec<Column> = headers
            .iter()
            .map(|name| Column::new(name, Vec::new()))
            .collect();

        for record in rdr.records() {
            let record = record?;
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                column.cells.push(Cell::parse(field));
            }
        }

        Self::new(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// A table with no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require_column(&self, name: &str) -> Result<&Column, DataError> {
        self.column(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Copy of this table with `column` appended, or replacing the existing
    /// column of the same name in place.
    pub fn with_column(&self, column: Column) -> Result<Table, DataError> {
        let mut columns = self.columns.clone();
        match columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => columns.push(column),
        }
        if self.columns.is_empty() {
            return Table::new(columns);
        }
        let expected = self.n_rows;
        if let Some(bad) = columns.iter().find(|c| c.cells.len() != expected) {
            return Err(DataError::ColumnLength {
                column: bad.name.clone(),
                expected,
                actual: bad.cells.len(),
            });
        }
        Ok(Table {
            columns,
            n_rows: expected,
        })
    }

    /// Copy of this table without the named column.
    pub fn without_column(&self, name: &str) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .filter(|c| c.name != name)
                .cloned()
                .collect(),
            n_rows: self.n_rows,
        }
    }
}
