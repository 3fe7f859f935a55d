//! Stratified train/test split.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::TrainError;

/// Row indices on each side of the split, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Partition row indices so every class keeps its share on both sides.
///
/// Each class sends `round(n_c * test_fraction)` rows to the test side,
/// clamped to `[1, n_c - 1]`. Classes are shuffled in ascending code order
/// from one ChaCha stream seeded with `seed`, so a given input always
/// splits the same way.
pub fn stratified_split(
    labels: &[usize],
    test_fraction: f64,
    seed: u64,
) -> Result<Split, TrainError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(TrainError::Split(format!(
            "test fraction must be between 0 and 1, got {test_fraction}"
        )));
    }

    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &class) in labels.iter().enumerate() {
        by_class.entry(class).or_default().push(idx);
    }
    if by_class.is_empty() {
        return Err(TrainError::Split("no rows to split".to_string()));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for (class, mut members) in by_class {
        let n = members.len();
        if n < 2 {
            return Err(TrainError::Split(format!(
                "class {class} has {n} member(s), at least 2 are needed"
            )));
        }
        let n_test = ((n as f64 * test_fraction).round() as usize).clamp(1, n - 1);
        members.shuffle(&mut rng);
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}
