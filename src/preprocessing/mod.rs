//! Preprocessing transformers for feature standardization.
//!
//! # Example
//!
//! ```
//! use esponja::prelude::*;
//! use esponja::preprocessing::StandardScaler;
//!
//! let data = Matrix::from_vec(4, 2, vec![
//!     1.0, 100.0,
//!     2.0, 200.0,
//!     3.0, 300.0,
//!     4.0, 400.0,
//! ]).expect("valid matrix dimensions");
//!
//! let mut scaler = StandardScaler::new();
//! let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
//!
//! // Each column now has mean ≈ 0 and std ≈ 1
//! assert!(scaled.get(0, 0).abs() < 2.0);
//! ```

use crate::error::{EsponjaError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// A fitted standard deviation at or below this threshold is treated as
/// zero: the column is constant and its standardized output is 0.0.
const STD_FLOOR: f32 = 1e-10;

/// Standardizes features by removing the mean and scaling to unit variance.
///
/// The standard score of a sample x is: z = (x - mean) / std.
///
/// Statistics are learned once by `fit` over the training columns, then
/// reused read-only by every `transform` until the scaler is refitted.
/// Standard deviation uses the population convention (divide by n), the
/// same convention the statistical tests in this crate assume.
///
/// Zero-variance policy: a column whose fitted std is (numerically) zero
/// transforms to exactly 0.0 — never a division by zero, never a
/// non-finite output.
///
/// # Example
///
/// ```
/// use esponja::prelude::*;
/// use esponja::preprocessing::StandardScaler;
///
/// let data = Matrix::from_vec(3, 1, vec![0.0, 1.0, 2.0]).expect("valid matrix dimensions");
///
/// let mut scaler = StandardScaler::new();
/// let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
/// let restored = scaler.inverse_transform(&scaled).expect("inverse should succeed");
/// assert!((restored.get(2, 0) - 2.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f32>>,
    /// Standard deviation of each feature (computed during fit).
    std: Option<Vec<f32>>,
}

impl StandardScaler {
    /// Creates a new, unfitted `StandardScaler`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    /// Returns the mean of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn mean(&self) -> &[f32] {
        self.mean
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns the standard deviation of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the scaler is not fitted.
    #[must_use]
    pub fn std(&self) -> &[f32] {
        self.std
            .as_ref()
            .expect("Scaler not fitted. Call fit() first.")
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }

    /// Transforms standardized data back to the original scale.
    ///
    /// Exact inverse for columns with nonzero std; constant columns map
    /// back to their mean.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or dimensions mismatch.
    pub fn inverse_transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        let mean = self
            .mean
            .as_ref()
            .ok_or_else(|| EsponjaError::not_fitted("StandardScaler"))?;
        let std = self
            .std
            .as_ref()
            .ok_or_else(|| EsponjaError::not_fitted("StandardScaler"))?;

        let (n_samples, n_features) = x.shape();
        if n_features != mean.len() {
            return Err(EsponjaError::shape_mismatch(
                "feature columns",
                mean.len(),
                n_features,
            ));
        }

        let mut result = vec![0.0; n_samples * n_features];

        for i in 0..n_samples {
            for j in 0..n_features {
                let mut val = x.get(i, j);
                if std[j] > STD_FLOOR {
                    val *= std[j];
                }
                val += mean[j];
                result[i * n_features + j] = val;
            }
        }

        Matrix::from_vec(n_samples, n_features, result).map_err(Into::into)
    }
}

impl Transformer for StandardScaler {
    /// Computes the per-column mean and population standard deviation.
    fn fit(&mut self, x: &Matrix<f32>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(EsponjaError::empty_input("scaler training data"));
        }

        let mut mean = vec![0.0; n_features];
        for (j, mean_j) in mean.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in 0..n_samples {
                sum += x.get(i, j);
            }
            *mean_j = sum / n_samples as f32;
        }

        let mut std = vec![0.0; n_features];
        for (j, std_j) in std.iter_mut().enumerate() {
            let mut sum_sq = 0.0;
            for i in 0..n_samples {
                let diff = x.get(i, j) - mean[j];
                sum_sq += diff * diff;
            }
            // Population std (divide by n, not n-1)
            *std_j = (sum_sq / n_samples as f32).sqrt();
        }

        self.mean = Some(mean);
        self.std = Some(std);

        Ok(())
    }

    /// Standardizes the data using fitted mean and std.
    fn transform(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        let mean = self
            .mean
            .as_ref()
            .ok_or_else(|| EsponjaError::not_fitted("StandardScaler"))?;
        let std = self
            .std
            .as_ref()
            .ok_or_else(|| EsponjaError::not_fitted("StandardScaler"))?;

        let (n_samples, n_features) = x.shape();
        if n_features != mean.len() {
            return Err(EsponjaError::shape_mismatch(
                "feature columns",
                mean.len(),
                n_features,
            ));
        }

        let mut result = vec![0.0; n_samples * n_features];

        for i in 0..n_samples {
            for j in 0..n_features {
                let value = if std[j] > STD_FLOOR {
                    (x.get(i, j) - mean[j]) / std[j]
                } else {
                    // Constant column: standardized value is defined as 0.0
                    0.0
                };
                result[i * n_features + j] = value;
            }
        }

        Matrix::from_vec(n_samples, n_features, result).map_err(Into::into)
    }
}
