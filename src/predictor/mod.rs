//! The suitability predictor: heuristic labels in, trained ensemble out.
//!
//! `fit` derives labels from the weighted suitability heuristic, learns
//! scaling statistics, splits off a held-out subset, and trains the random
//! forest. Diagnostics (train/test R², ranked feature importances) are
//! returned as a value; rendering them is the caller's concern.
//!
//! # Example
//!
//! ```
//! use esponja::predictor::SuitabilityPredictor;
//! use esponja::synthetic::generate_sites;
//!
//! let table = generate_sites(60, 7);
//! let mut predictor = SuitabilityPredictor::new(42).with_n_estimators(5);
//! let report = predictor.fit(&table).expect("fit should succeed");
//! assert!(report.train_r2 > 0.0);
//!
//! let scores = predictor.predict(&table).expect("predict should succeed");
//! assert_eq!(scores.len(), 60);
//! ```

use crate::error::{EsponjaError, Result};
use crate::model_selection::train_test_split;
use crate::preprocessing::StandardScaler;
use crate::primitives::Vector;
use crate::scoring::SuitabilityWeights;
use crate::table::{SiteTable, FEATURE_COLUMNS};
use crate::traits::{Estimator, Transformer};
use crate::tree::RandomForestRegressor;
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_N_ESTIMATORS: usize = 100;
const DEFAULT_MAX_DEPTH: usize = 10;
const DEFAULT_TEST_FRACTION: f32 = 0.2;

/// One feature's relative contribution to the ensemble's splits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Feature column name
    pub name: String,
    /// Relative importance in [0, 1]; importances sum to 1.0
    pub importance: f32,
}

/// Diagnostics produced by a `fit` call.
///
/// Importances are sorted descending. The `Display` impl renders the
/// train/test R² lines and the top-5 features for console reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    /// R² on the training subset
    pub train_r2: f32,
    /// R² on the held-out subset
    pub test_r2: f32,
    /// Per-feature importances, sorted descending by importance
    pub importances: Vec<FeatureImportance>,
}

impl FitReport {
    /// Returns the `n` most important features.
    #[must_use]
    pub fn top_features(&self, n: usize) -> &[FeatureImportance] {
        &self.importances[..n.min(self.importances.len())]
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model R² score (train): {:.3}", self.train_r2)?;
        writeln!(f, "Model R² score (test): {:.3}", self.test_r2)?;
        writeln!(f)?;
        writeln!(f, "Top 5 most important features:")?;
        for fi in self.top_features(5) {
            writeln!(f, "  {:<26} {:.4}", fi.name, fi.importance)?;
        }
        Ok(())
    }
}

/// Predicts sponge-park suitability scores for candidate sites.
///
/// Owns its scaler state and trained forest exclusively; site tables are
/// borrowed and never mutated. The seed passed at construction drives the
/// train/test shuffle and the forest's bootstrap draws, so two fits on the
/// same table produce the same model.
///
/// State machine: unfitted until the first successful `fit`; `predict`
/// errors with `NotFitted` before that. Refitting wholesale-replaces the
/// scaler and forest.
#[derive(Debug, Clone)]
pub struct SuitabilityPredictor {
    weights: SuitabilityWeights,
    scaler: StandardScaler,
    forest: Option<RandomForestRegressor>,
    feature_names: Option<Vec<String>>,
    n_estimators: usize,
    max_depth: usize,
    test_fraction: f32,
    seed: u64,
}

impl SuitabilityPredictor {
    /// Creates an unfitted predictor with the given seed and the default
    /// hyperparameters (100 trees, depth <= 10, 80/20 split).
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            weights: SuitabilityWeights::default(),
            scaler: StandardScaler::new(),
            forest: None,
            feature_names: None,
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_depth: DEFAULT_MAX_DEPTH,
            test_fraction: DEFAULT_TEST_FRACTION,
            seed,
        }
    }

    /// Overrides the number of trees in the forest.
    #[must_use]
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Overrides the maximum depth of each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Overrides the held-out fraction for the fit-time split.
    #[must_use]
    pub fn with_test_fraction(mut self, test_fraction: f32) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    /// Overrides the suitability weight set used to derive labels.
    #[must_use]
    pub fn with_weights(mut self, weights: SuitabilityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Returns true once `fit` has completed successfully.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.forest.is_some()
    }

    /// The weight set used for label derivation.
    #[must_use]
    pub fn weights(&self) -> &SuitabilityWeights {
        &self.weights
    }

    /// Trains the pipeline on a site table and returns fit diagnostics.
    ///
    /// Labels come from the suitability heuristic; features are the 15
    /// declared columns, standardized with statistics learned here. The
    /// table is split 80/20 (seeded) and the forest is trained on the
    /// larger subset.
    ///
    /// The table must contain every feature column and enough rows that
    /// both split subsets are non-empty (at least 3 at the default
    /// fraction); smaller tables fail with `ShapeMismatch`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` for a missing feature column or an empty or
    /// too-small table.
    pub fn fit(&mut self, table: &SiteTable) -> Result<FitReport> {
        // At fit time an incomplete table is a shape problem, not a schema
        // drift between fit and predict.
        for name in FEATURE_COLUMNS {
            if !table.has_column(name) {
                return Err(EsponjaError::ShapeMismatch {
                    expected: format!("feature column '{name}' present"),
                    actual: "column missing".to_string(),
                });
            }
        }

        let labels = self.weights.scores(table)?;
        let x = table.feature_matrix()?;

        let mut scaler = StandardScaler::new();
        let x_scaled = scaler.fit_transform(&x)?;

        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x_scaled, &labels, self.test_fraction, Some(self.seed))?;

        let mut forest = RandomForestRegressor::new(self.n_estimators)
            .with_max_depth(self.max_depth)
            .with_random_state(self.seed);
        forest.fit(&x_train, &y_train)?;

        let train_r2 = forest.score(&x_train, &y_train);
        let test_r2 = forest.score(&x_test, &y_test);
        let importances = forest
            .feature_importances()
            .ok_or_else(|| EsponjaError::from("feature importances unavailable after fit"))?;

        let mut ranked: Vec<FeatureImportance> = FEATURE_COLUMNS
            .iter()
            .zip(importances)
            .map(|(name, importance)| FeatureImportance {
                name: (*name).to_string(),
                importance,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        self.scaler = scaler;
        self.forest = Some(forest);
        self.feature_names = Some(FEATURE_COLUMNS.iter().map(|n| (*n).to_string()).collect());

        Ok(FitReport {
            train_r2,
            test_r2,
            importances: ranked,
        })
    }

    /// Predicts a suitability score per row, in input row order.
    ///
    /// The table must contain every feature column seen at fit time;
    /// columns are matched by name, so their order is free.
    ///
    /// # Errors
    ///
    /// `NotFitted` before `fit`; `SchemaMismatch` naming the first missing
    /// required column; `ShapeMismatch` for an empty table.
    pub fn predict(&self, table: &SiteTable) -> Result<Vector<f32>> {
        let forest = self
            .forest
            .as_ref()
            .ok_or_else(|| EsponjaError::not_fitted("SuitabilityPredictor"))?;
        let feature_names = self
            .feature_names
            .as_ref()
            .ok_or_else(|| EsponjaError::not_fitted("SuitabilityPredictor"))?;

        for name in feature_names {
            if !table.has_column(name) {
                return Err(EsponjaError::SchemaMismatch {
                    column: name.clone(),
                });
            }
        }

        let x = table.feature_matrix()?;
        let x_scaled = self.scaler.transform(&x)?;
        Ok(forest.predict(&x_scaled))
    }
}

impl Default for SuitabilityPredictor {
    /// A predictor seeded with the conventional 42.
    fn default() -> Self {
        Self::new(42)
    }
}
