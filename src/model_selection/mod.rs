//! Model selection utilities: train/test splitting.

use crate::error::{EsponjaError, Result};
use crate::primitives::{Matrix, Vector};

/// Validates inputs for `train_test_split`, returning (n_train, n_test).
fn validate_split_inputs(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    test_size: f32,
) -> Result<(usize, usize)> {
    if test_size <= 0.0 || test_size >= 1.0 {
        return Err(EsponjaError::InvalidArgument {
            param: "test_size".to_string(),
            value: format!("{test_size}"),
            constraint: "0 < test_size < 1".to_string(),
        });
    }

    let (n_samples, _) = x.shape();
    if n_samples != y.len() {
        return Err(EsponjaError::shape_mismatch("samples", n_samples, y.len()));
    }

    let n_test = (n_samples as f32 * test_size).round() as usize;
    let n_train = n_samples - n_test;

    if n_test == 0 || n_train == 0 {
        return Err(EsponjaError::ShapeMismatch {
            expected: "enough rows for non-empty train and test subsets".to_string(),
            actual: format!("{n_samples} rows (n_train={n_train}, n_test={n_test})"),
        });
    }

    Ok((n_train, n_test))
}

/// Shuffles row indices with an optional seed.
fn shuffle_indices(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let mut indices: Vec<usize> = (0..n_samples).collect();

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    } else {
        let mut rng = rand::thread_rng();
        indices.shuffle(&mut rng);
    }

    indices
}

/// Extracts the rows named by `indices` into a new (features, targets) pair.
fn extract_samples(x: &Matrix<f32>, y: &Vector<f32>, indices: &[usize]) -> (Matrix<f32>, Vector<f32>) {
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
        .expect("extracted dimensions are consistent by construction");
    (matrix, Vector::from_vec(targets))
}

/// Splits (features, targets) into shuffled train and test subsets.
///
/// Returns `(x_train, x_test, y_train, y_test)`. A fixed `random_state`
/// makes the shuffle, and therefore the split, reproducible.
///
/// # Errors
///
/// Returns `InvalidArgument` if `test_size` is outside (0, 1), and
/// `ShapeMismatch` if sample counts disagree or either subset would be
/// empty.
///
/// # Examples
///
/// ```
/// use esponja::model_selection::train_test_split;
/// use esponja::primitives::{Matrix, Vector};
///
/// let x = Matrix::from_vec(10, 1, (0..10).map(|i| i as f32).collect()).expect("valid matrix dimensions");
/// let y = Vector::from_vec((0..10).map(|i| i as f32).collect());
///
/// let (x_train, x_test, y_train, y_test) =
///     train_test_split(&x, &y, 0.2, Some(42)).expect("split should succeed");
/// assert_eq!(x_train.n_rows(), 8);
/// assert_eq!(x_test.n_rows(), 2);
/// assert_eq!(y_train.len(), 8);
/// assert_eq!(y_test.len(), 2);
/// ```
#[allow(clippy::type_complexity)]
pub fn train_test_split(
    x: &Matrix<f32>,
    y: &Vector<f32>,
    test_size: f32,
    random_state: Option<u64>,
) -> Result<(Matrix<f32>, Matrix<f32>, Vector<f32>, Vector<f32>)> {
    let (n_train, _) = validate_split_inputs(x, y, test_size)?;
    let n_samples = x.shape().0;

    let indices = shuffle_indices(n_samples, random_state);
    let train_indices = &indices[..n_train];
    let test_indices = &indices[n_train..];

    let (x_train, y_train) = extract_samples(x, y, train_indices);
    let (x_test, y_test) = extract_samples(x, y, test_indices);

    Ok((x_train, x_test, y_train, y_test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(n: usize) -> (Matrix<f32>, Vector<f32>) {
        let x = Matrix::from_vec(n, 2, (0..n * 2).map(|i| i as f32).collect())
            .expect("matrix creation should succeed");
        let y = Vector::from_vec((0..n).map(|i| i as f32).collect());
        (x, y)
    }

    #[test]
    fn test_split_shapes() {
        let (x, y) = sample_data(10);
        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, 0.2, Some(42)).expect("split should succeed");

        assert_eq!(x_train.shape(), (8, 2));
        assert_eq!(x_test.shape(), (2, 2));
        assert_eq!(y_train.len(), 8);
        assert_eq!(y_test.len(), 2);
    }

    #[test]
    fn test_split_reproducible_with_seed() {
        let (x, y) = sample_data(10);
        let (x_train1, x_test1, y_train1, y_test1) =
            train_test_split(&x, &y, 0.2, Some(42)).expect("first split should succeed");
        let (x_train2, x_test2, y_train2, y_test2) =
            train_test_split(&x, &y, 0.2, Some(42)).expect("second split should succeed");

        assert_eq!(x_train1.as_slice(), x_train2.as_slice());
        assert_eq!(x_test1.as_slice(), x_test2.as_slice());
        assert_eq!(y_train1.as_slice(), y_train2.as_slice());
        assert_eq!(y_test1.as_slice(), y_test2.as_slice());
    }

    #[test]
    fn test_split_different_seeds_differ() {
        let (x, y) = sample_data(10);
        let (_, _, y_train1, _) =
            train_test_split(&x, &y, 0.2, Some(42)).expect("split with seed 42");
        let (_, _, y_train2, _) =
            train_test_split(&x, &y, 0.2, Some(123)).expect("split with seed 123");
        assert_ne!(y_train1.as_slice(), y_train2.as_slice());
    }

    #[test]
    fn test_split_partitions_all_samples() {
        let (x, y) = sample_data(10);
        let (_, _, y_train, y_test) =
            train_test_split(&x, &y, 0.3, Some(42)).expect("split should succeed");

        let mut all: Vec<f32> = y_train
            .as_slice()
            .iter()
            .chain(y_test.as_slice())
            .copied()
            .collect();
        all.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));
        assert_eq!(all, (0..10).map(|i| i as f32).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_invalid_test_size() {
        let (x, y) = sample_data(10);
        assert!(train_test_split(&x, &y, 0.0, Some(42)).is_err());
        assert!(train_test_split(&x, &y, 1.0, Some(42)).is_err());
        assert!(train_test_split(&x, &y, -0.5, Some(42)).is_err());
    }

    #[test]
    fn test_split_mismatched_lengths() {
        let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("matrix");
        let y = Vector::from_slice(&[1.0, 2.0]);
        assert!(train_test_split(&x, &y, 0.2, Some(42)).is_err());
    }

    #[test]
    fn test_split_too_few_rows() {
        // One row: the test subset would be empty at any valid ratio.
        let (x, y) = sample_data(1);
        let result = train_test_split(&x, &y, 0.2, Some(42));
        assert!(matches!(
            result.unwrap_err(),
            EsponjaError::ShapeMismatch { .. }
        ));
    }
}
