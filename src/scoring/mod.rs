//! Suitability scoring: the hand-designed weighted heuristic that labels
//! training data.
//!
//! The weight set is frozen configuration, not learned state. The seven
//! weighted attributes and their weights are kept exactly as designed;
//! no domain claim is made that they are optimal.

use crate::error::{EsponjaError, Result};
use crate::primitives::Vector;
use crate::table::SiteTable;
use serde::{Deserialize, Serialize};

/// Tolerance for the weights-sum-to-one check.
const WEIGHT_SUM_TOLERANCE: f32 = 1e-4;

/// The default suitability weight set: (attribute, weight) pairs.
const DEFAULT_WEIGHTS: [(&str, f32); 7] = [
    ("flood_risk", 0.25),
    ("population_density", 0.15),
    ("green_space_density", 0.10),
    ("heat_island_intensity", 0.15),
    ("soil_permeability", 0.15),
    ("land_availability", 0.10),
    ("community_support", 0.10),
];

/// Immutable weighted-sum configuration for suitability labels.
///
/// Validated once at construction: every weight positive, sum 1.0 within
/// tolerance. Attributes present in a table but absent from the weight set
/// contribute nothing to the score.
///
/// # Examples
///
/// ```
/// use esponja::scoring::SuitabilityWeights;
///
/// let weights = SuitabilityWeights::default();
/// assert_eq!(weights.len(), 7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuitabilityWeights {
    weights: Vec<(String, f32)>,
}

impl Default for SuitabilityWeights {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|(name, w)| ((*name).to_string(), *w))
                .collect(),
        }
    }
}

impl SuitabilityWeights {
    /// Creates a custom weight set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the set is empty, any weight is not
    /// strictly positive, or the weights don't sum to 1.0 within tolerance.
    pub fn new(weights: Vec<(String, f32)>) -> Result<Self> {
        if weights.is_empty() {
            return Err(EsponjaError::InvalidArgument {
                param: "weights".to_string(),
                value: "[]".to_string(),
                constraint: "at least one (attribute, weight) pair".to_string(),
            });
        }

        for (name, w) in &weights {
            if *w <= 0.0 || !w.is_finite() {
                return Err(EsponjaError::InvalidArgument {
                    param: format!("weights[{name}]"),
                    value: format!("{w}"),
                    constraint: "weight > 0".to_string(),
                });
            }
        }

        let sum: f32 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EsponjaError::InvalidArgument {
                param: "weights".to_string(),
                value: format!("sum = {sum}"),
                constraint: "weights must sum to 1.0".to_string(),
            });
        }

        Ok(Self { weights })
    }

    /// Number of weighted attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the weight set is empty (never the case for a
    /// validated instance).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the weighted (attribute, weight) pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, f32)] {
        &self.weights
    }

    /// Computes the suitability label for every row of the table.
    ///
    /// Pure and deterministic: score[i] = Σ weight_a * table[a][i] over the
    /// weighted attributes. Unweighted columns never affect the result.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if any weighted attribute is missing from the
    /// table (every site record must carry every attribute).
    pub fn scores(&self, table: &SiteTable) -> Result<Vector<f32>> {
        let n_rows = table.n_rows();
        let mut scores = vec![0.0_f32; n_rows];

        for (name, weight) in &self.weights {
            let col = table.column(name).map_err(|_| EsponjaError::ShapeMismatch {
                expected: format!("weighted attribute '{name}' present"),
                actual: "column missing".to_string(),
            })?;
            for (score, &value) in scores.iter_mut().zip(col.as_slice()) {
                *score += value * weight;
            }
        }

        Ok(Vector::from_vec(scores))
    }
}
