//! Accuracy, F1 averages and the per-class text report.
//!
//! Conventions follow scikit-learn: a precision, recall or F1 whose
//! denominator is zero counts as 0, headline F1 averages run over every
//! label seen in either `y_true` or `y_pred`, and the text report lists the
//! requested labels in the requested order with two decimals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Headline scores for one model on one test split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub f1_macro: f64,
    pub f1_weighted: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub metrics: Metrics,
    pub classification_report_text: String,
}

/// Per-label counts behind precision, recall and F1.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    tp: usize,
    fp: usize,
    fn_: usize,
}

impl Tally {
    fn support(&self) -> usize {
        self.tp + self.fn_
    }

    fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    fn f1(&self) -> f64 {
        ratio(2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn tally<L: PartialEq>(y_true: &[L], y_pred: &[L], label: &L) -> Tally {
    let mut t = Tally::default();
    for (truth, predicted) in y_true.iter().zip(y_pred) {
        match (truth == label, predicted == label) {
            (true, true) => t.tp += 1,
            (false, true) => t.fp += 1,
            (true, false) => t.fn_ += 1,
            (false, false) => {}
        }
    }
    t
}

/// Score predictions against ground truth.
///
/// `labels` controls which rows the text report shows and in what order.
pub fn evaluate_classification<L>(
    y_true: &[L],
    y_pred: &[L],
    labels: &[L],
) -> Result<EvalResult, EvalError>
where
    L: PartialEq + fmt::Display,
{
    if y_true.len() != y_pred.len() {
        return Err(EvalError::LengthMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(EvalError::Empty);
    }

    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    let accuracy = ratio(correct, y_true.len());

    let mut present: Vec<&L> = Vec::new();
    for label in y_true.iter().chain(y_pred) {
        if !present.contains(&label) {
            present.push(label);
        }
    }
    let tallies: Vec<Tally> = present.iter().map(|l| tally(y_true, y_pred, l)).collect();
    let f1_macro = tallies.iter().map(Tally::f1).sum::<f64>() / tallies.len() as f64;
    let f1_weighted = weighted(&tallies, Tally::f1);

    let report = classification_report(y_true, y_pred, labels, accuracy);

    Ok(EvalResult {
        metrics: Metrics {
            accuracy,
            f1_macro,
            f1_weighted,
        },
        classification_report_text: report,
    })
}

fn weighted(tallies: &[Tally], score: impl Fn(&Tally) -> f64) -> f64 {
    let total: usize = tallies.iter().map(Tally::support).sum();
    if total == 0 {
        return 0.0;
    }
    tallies
        .iter()
        .map(|t| score(t) * t.support() as f64)
        .sum::<f64>()
        / total as f64
}

fn mean(tallies: &[Tally], score: impl Fn(&Tally) -> f64) -> f64 {
    if tallies.is_empty() {
        return 0.0;
    }
    tallies.iter().map(score).sum::<f64>() / tallies.len() as f64
}

const DIGITS: usize = 2;

fn classification_report<L>(y_true: &[L], y_pred: &[L], labels: &[L], accuracy: f64) -> String
where
    L: PartialEq + fmt::Display,
{
    let names: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
    let width = names
        .iter()
        .map(String::len)
        .chain(["weighted avg".len(), DIGITS])
        .max()
        .unwrap_or(DIGITS);
    let tallies: Vec<Tally> = labels.iter().map(|l| tally(y_true, y_pred, l)).collect();
    let total_support: usize = tallies.iter().map(Tally::support).sum();

    let mut out = format!(
        "{:>width$}  {:>9} {:>9} {:>9} {:>9}\n\n",
        "", "precision", "recall", "f1-score", "support"
    );
    for (name, t) in names.iter().zip(&tallies) {
        out.push_str(&row(name, width, t.precision(), t.recall(), t.f1(), t.support()));
    }
    out.push('\n');

    // Only when the listed labels cover every observed value is micro
    // averaging the same as accuracy.
    let covers_all = y_true.iter().chain(y_pred).all(|v| labels.contains(v));
    if covers_all {
        out.push_str(&format!(
            "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}\n",
            "accuracy", "", "", accuracy, total_support
        ));
    } else {
        let micro = tallies.iter().fold(Tally::default(), |acc, t| Tally {
            tp: acc.tp + t.tp,
            fp: acc.fp + t.fp,
            fn_: acc.fn_ + t.fn_,
        });
        out.push_str(&row(
            "micro avg",
            width,
            micro.precision(),
            micro.recall(),
            micro.f1(),
            total_support,
        ));
    }

    out.push_str(&row(
        "macro avg",
        width,
        mean(&tallies, Tally::precision),
        mean(&tallies, Tally::recall),
        mean(&tallies, Tally::f1),
        total_support,
    ));
    out.push_str(&row(
        "weighted avg",
        width,
        weighted(&tallies, Tally::precision),
        weighted(&tallies, Tally::recall),
        weighted(&tallies, Tally::f1),
        total_support,
    ));
    out
}

fn row(name: &str, width: usize, precision: f64, recall: f64, f1: f64, support: usize) -> String {
    format!("{name:>width$}  {precision:>9.2} {recall:>9.2} {f1:>9.2} {support:>9}\n")
}
