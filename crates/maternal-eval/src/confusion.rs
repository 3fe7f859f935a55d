use std::fmt;

use serde::Serialize;

use crate::error::EvalError;

/// Counts of (true label, predicted label) pairs.
///
/// Rows are true labels and columns predicted labels, both in the order
/// the labels were given. Pairs involving a label outside that list are
/// not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_labels<L>(y_true: &[L], y_pred: &[L], labels: &[L]) -> Result<Self, EvalError>
    where
        L: PartialEq + fmt::Display,
    {
        if y_true.len() != y_pred.len() {
            return Err(EvalError::LengthMismatch {
                expected: y_true.len(),
                actual: y_pred.len(),
            });
        }

        let mut counts = vec![vec![0; labels.len()]; labels.len()];
        for (truth, predicted) in y_true.iter().zip(y_pred) {
            let row = labels.iter().position(|l| l == truth);
            let col = labels.iter().position(|l| l == predicted);
            if let (Some(row), Some(col)) = (row, col) {
                counts[row][col] += 1;
            }
        }

        Ok(ConfusionMatrix {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            counts,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn n_labels(&self) -> usize {
        self.labels.len()
    }

    /// Count of samples with true label `row` predicted as `col`.
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.counts[row][col]
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(String::len).max().unwrap_or(0).max(4);
        write!(f, "{:>width$}", "")?;
        for label in &self.labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip(&self.counts) {
            write!(f, "{label:>width$}")?;
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
