//! Split-finding helpers for regression tree building.

use crate::primitives::Matrix;

/// Population variance of a slice of targets.
pub(super) fn variance_of(y: &[f32]) -> f32 {
    if y.len() <= 1 {
        return 0.0;
    }
    let mean = y.iter().sum::<f32>() / y.len() as f32;
    y.iter().map(|&v| (v - mean).powi(2)).sum::<f32>() / y.len() as f32
}

/// Sample-weighted variance of a candidate split (the MSE criterion).
fn weighted_split_variance(y_left: &[f32], y_right: &[f32]) -> f32 {
    let n_left = y_left.len() as f32;
    let n_right = y_right.len() as f32;
    let n_total = n_left + n_right;

    if n_total == 0.0 {
        return 0.0;
    }

    (n_left / n_total) * variance_of(y_left) + (n_right / n_total) * variance_of(y_right)
}

/// Sorted unique values of one feature column.
fn unique_feature_values(x: &Matrix<f32>, feature_idx: usize) -> Vec<f32> {
    let mut values: Vec<f32> = (0..x.n_rows()).map(|i| x.get(i, feature_idx)).collect();
    values.sort_by(|a, b| a.partial_cmp(b).expect("feature values must be finite"));
    values.dedup();
    values
}

/// Splits target values at a threshold on one feature.
fn split_targets(x: &Matrix<f32>, y: &[f32], feature_idx: usize, threshold: f32) -> (Vec<f32>, Vec<f32>) {
    let mut y_left = Vec::new();
    let mut y_right = Vec::new();

    for (row, &y_val) in y.iter().enumerate() {
        if x.get(row, feature_idx) <= threshold {
            y_left.push(y_val);
        } else {
            y_right.push(y_val);
        }
    }
    (y_left, y_right)
}

/// Finds the (feature, threshold) pair with the largest variance reduction.
///
/// Candidate thresholds are the midpoints between consecutive unique values
/// of each feature. Returns `None` when no split reduces variance.
pub(super) fn best_split(x: &Matrix<f32>, y: &[f32]) -> Option<(usize, f32)> {
    let (n_samples, n_features) = x.shape();
    if n_samples < 2 {
        return None;
    }

    let current_variance = variance_of(y);
    let mut best_gain = 0.0;
    let mut best: Option<(usize, f32)> = None;

    for feature_idx in 0..n_features {
        let values = unique_feature_values(x, feature_idx);

        for i in 0..values.len().saturating_sub(1) {
            let threshold = (values[i] + values[i + 1]) / 2.0;
            let (y_left, y_right) = split_targets(x, y, feature_idx, threshold);
            if y_left.is_empty() || y_right.is_empty() {
                continue;
            }

            let gain = current_variance - weighted_split_variance(&y_left, &y_right);
            if gain > best_gain {
                best_gain = gain;
                best = Some((feature_idx, threshold));
            }
        }
    }

    best
}

/// Partitions row indices at a threshold on one feature.
pub(super) fn partition_rows(
    x: &Matrix<f32>,
    feature_idx: usize,
    threshold: f32,
) -> (Vec<usize>, Vec<usize>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for row in 0..x.n_rows() {
        if x.get(row, feature_idx) <= threshold {
            left.push(row);
        } else {
            right.push(row);
        }
    }
    (left, right)
}

/// Extracts the rows named by `indices` into a new (matrix, targets) pair.
pub(super) fn subset_by_rows(x: &Matrix<f32>, y: &[f32], indices: &[usize]) -> (Matrix<f32>, Vec<f32>) {
    let n_cols = x.n_cols();
    let mut data = Vec::with_capacity(indices.len() * n_cols);
    let mut targets = Vec::with_capacity(indices.len());

    for &idx in indices {
        for col in 0..n_cols {
            data.push(x.get(idx, col));
        }
        targets.push(y[idx]);
    }

    let matrix = Matrix::from_vec(indices.len(), n_cols, data)
        .expect("subset dimensions are consistent by construction");
    (matrix, targets)
}
