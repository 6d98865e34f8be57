//! Evaluation metrics for the regression pipeline.
//!
//! Regression metrics (R², MSE) plus Pearson correlation for checking that
//! predicted suitability tracks the heuristic labels.

use crate::primitives::Vector;

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`)
///
/// where `SS_res` is the residual sum of squares and `SS_tot` is the total
/// sum of squares. Returns 0.0 when `SS_tot` is zero (constant target).
///
/// # Examples
///
/// ```
/// use esponja::metrics::r_squared;
/// use esponja::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_pred, &y_true);
/// assert!(r2 > 0.9);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let y_mean = y_true.mean();

    let ss_res: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f32 = y_true.as_slice().iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }

    1.0 - (ss_res / ss_tot)
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true` - `y_pred)²`
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_pred: &Vector<f32>, y_true: &Vector<f32>) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n = y_true.len() as f32;

    let sum_sq_error: f32 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    sum_sq_error / n
}

/// Computes the Pearson correlation coefficient between two vectors.
///
/// ρ(X, Y) = Cov(X, Y) / (σ_X σ_Y), in [-1, 1]. Returns 0.0 when either
/// vector is constant (undefined correlation).
///
/// # Examples
///
/// ```
/// use esponja::metrics::pearson_correlation;
/// use esponja::primitives::Vector;
///
/// let x = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
/// let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0]);
/// let r = pearson_correlation(&x, &y);
/// assert!((r - 1.0).abs() < 1e-6);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn pearson_correlation(x: &Vector<f32>, y: &Vector<f32>) -> f32 {
    assert_eq!(x.len(), y.len(), "Vectors must have same length");
    assert!(!x.is_empty(), "Vectors cannot be empty");

    let n = x.len() as f32;
    let x_mean = x.mean();
    let y_mean = y.mean();

    let cov: f32 = x
        .as_slice()
        .iter()
        .zip(y.as_slice().iter())
        .map(|(a, b)| (a - x_mean) * (b - y_mean))
        .sum::<f32>()
        / n;

    let x_std = x.variance().sqrt();
    let y_std = y.variance().sqrt();

    if x_std == 0.0 || y_std == 0.0 {
        return 0.0;
    }

    cov / (x_std * y_std)
}
