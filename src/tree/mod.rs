//! Regression trees and the random forest ensemble.
//!
//! CART-style regression trees split on mean-squared-error reduction and
//! predict the mean target value of the samples reaching a leaf. The
//! random forest trains each tree on a seeded bootstrap sample and
//! averages tree outputs, which is what smooths the hand-crafted
//! suitability labels into a stable predictor.
//!
//! # Example
//!
//! ```
//! use esponja::tree::RandomForestRegressor;
//! use esponja::primitives::{Matrix, Vector};
//! use esponja::traits::Estimator;
//!
//! let x = Matrix::from_vec(5, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0]).expect("valid matrix dimensions");
//! let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0, 10.0]);
//!
//! let mut rf = RandomForestRegressor::new(10).with_max_depth(5).with_random_state(42);
//! rf.fit(&x, &y).expect("fit should succeed");
//! let predictions = rf.predict(&x);
//! assert_eq!(predictions.len(), 5);
//! ```

use crate::error::{EsponjaError, Result};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};

mod split;

use split::{best_split, partition_rows, subset_by_rows, variance_of};

/// Leaf node in a regression tree: predicts the mean of the training
/// targets that reached it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionLeaf {
    /// Predicted value (mean of y values in this leaf)
    pub value: f32,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// Internal node in a regression tree: a split condition with two subtrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionNode {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<RegressionTreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<RegressionTreeNode>,
}

/// A node in a regression tree (either internal node or leaf).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RegressionTreeNode {
    /// Internal decision node with split condition
    Node(RegressionNode),
    /// Leaf node with value prediction
    Leaf(RegressionLeaf),
}

impl RegressionTreeNode {
    /// Depth of the tree rooted at this node. Leaves have depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            RegressionTreeNode::Leaf(_) => 0,
            RegressionTreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }
}

/// Decision tree regressor using the CART algorithm with an MSE criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    tree: Option<RegressionTreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
}

impl DecisionTreeRegressor {
    /// Creates a new decision tree regressor with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }

    /// Sets the maximum depth of the tree (root has depth 0).
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the minimum number of samples required to split a node.
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    /// Sets the minimum number of samples required at a leaf.
    #[must_use]
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples.max(1);
        self
    }

    /// Returns the fitted tree root, if any.
    pub(crate) fn root(&self) -> Option<&RegressionTreeNode> {
        self.tree.as_ref()
    }

    /// Predicts the value for a single sample.
    fn predict_one(&self, x: &[f32]) -> f32 {
        let tree = self.tree.as_ref().expect("Model not fitted");

        let mut node = tree;
        loop {
            match node {
                RegressionTreeNode::Leaf(leaf) => return leaf.value,
                RegressionTreeNode::Node(internal) => {
                    if x[internal.feature_idx] <= internal.threshold {
                        node = &internal.left;
                    } else {
                        node = &internal.right;
                    }
                }
            }
        }
    }
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for DecisionTreeRegressor {
    /// Fits the decision tree to training data.
    ///
    /// # Errors
    ///
    /// Returns an error on sample-count mismatch or zero samples.
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let (n_rows, _n_cols) = x.shape();
        if n_rows != y.len() {
            return Err(EsponjaError::shape_mismatch("samples", n_rows, y.len()));
        }
        if n_rows == 0 {
            return Err(EsponjaError::empty_input("tree training data"));
        }

        self.tree = Some(grow_tree(
            x,
            y.as_slice(),
            0,
            self.max_depth,
            self.min_samples_split,
            self.min_samples_leaf,
        ));
        Ok(())
    }

    /// Predicts target values for each row of `x`.
    ///
    /// # Panics
    ///
    /// Panics if called before `fit`.
    fn predict(&self, x: &Matrix<f32>) -> Vector<f32> {
        let (n_samples, n_features) = x.shape();
        let mut predictions = Vec::with_capacity(n_samples);

        for row in 0..n_samples {
            let mut sample = Vec::with_capacity(n_features);
            for col in 0..n_features {
                sample.push(x.get(row, col));
            }
            predictions.push(self.predict_one(&sample));
        }

        Vector::from_vec(predictions)
    }
}

/// Random forest regressor.
///
/// Ensemble of decision tree regressors trained on bootstrap samples;
/// predictions are averaged across trees. A fixed `random_state` makes the
/// bootstrap draws, and therefore the whole fit, reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<DecisionTreeRegressor>,
    n_estimators: usize,
    max_depth: Option<usize>,
    random_state: Option<u64>,
    n_features: Option<usize>,
}

impl RandomForestRegressor {
    /// Creates a new random forest with `n_estimators` trees.
    #[must_use]
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            random_state: None,
            n_features: None,
        }
    }

    /// Sets the maximum depth for each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the random state for reproducible bootstrap sampling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Number of trees configured for this forest.
    #[must_use]
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Returns true if the forest has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Returns per-feature importances, normalized to sum to 1.0.
    ///
    /// Importance is the sample-count-weighted frequency with which each
    /// feature is chosen for a split, aggregated over all trees. Returns
    /// `None` before fit.
    pub fn feature_importances(&self) -> Option<Vec<f32>> {
        if self.trees.is_empty() {
            return None;
        }
        let n_features = self.n_features?;

        let mut total = vec![0.0; n_features];
        for tree in &self.trees {
            if let Some(root) = tree.root() {
                accumulate_importances(root, &mut total);
            }
        }

        let sum: f32 = total.iter().sum();
        if sum > 0.0 {
            for importance in &mut total {
                *importance /= sum;
            }
        }

        Some(total)
    }
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Estimator for RandomForestRegressor {
    /// Fits the forest: one tree per seeded bootstrap sample.
    ///
    /// Refitting fully replaces any previously trained trees.
    ///
    /// # Errors
    ///
    /// Returns an error on sample-count mismatch or zero samples.
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(EsponjaError::shape_mismatch("samples", n_samples, y.len()));
        }
        if n_samples == 0 {
            return Err(EsponjaError::empty_input("forest training data"));
        }

        self.trees = Vec::with_capacity(self.n_estimators);
        self.n_features = Some(n_features);

        for i in 0..self.n_estimators {
            // Per-tree seed: base seed offset by the tree index.
            let seed = self.random_state.map(|s| s + i as u64);
            let indices = bootstrap_sample(n_samples, seed);
            let (bootstrap_x, bootstrap_y) = subset_by_rows(x, y.as_slice(), &indices);

            let mut tree = match self.max_depth {
                Some(max_depth) => DecisionTreeRegressor::new().with_max_depth(max_depth),
                None => DecisionTreeRegressor::new(),
            };
            tree.fit(&bootstrap_x, &Vector::from_vec(bootstrap_y))?;
            self.trees.push(tree);
        }

        Ok(())
    }

    /// Predicts by averaging over all trees.
    ///
    /// # Panics
    ///
    /// Panics if called before `fit`.
    fn predict(&self, x: &Matrix<f32>) -> Vector<f32> {
        assert!(
            !self.trees.is_empty(),
            "Cannot predict with an unfitted random forest. Call fit() first."
        );

        let n_samples = x.shape().0;
        let mut predictions = vec![0.0; n_samples];

        for tree in &self.trees {
            let tree_preds = tree.predict(x);
            for (pred, &tree_pred) in predictions.iter_mut().zip(tree_preds.as_slice()) {
                *pred += tree_pred;
            }
        }

        let n_trees = self.trees.len() as f32;
        for pred in &mut predictions {
            *pred /= n_trees;
        }

        Vector::from_vec(predictions)
    }
}

/// Grows a regression tree recursively.
fn grow_tree(
    x: &Matrix<f32>,
    y: &[f32],
    depth: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
) -> RegressionTreeNode {
    let n_samples = y.len();
    let at_max_depth = max_depth.is_some_and(|max_d| depth >= max_d);

    if n_samples < min_samples_split || at_max_depth || variance_of(y) < 1e-10 {
        return leaf_from(y);
    }

    let Some((feature_idx, threshold)) = best_split(x, y) else {
        return leaf_from(y);
    };

    let (left_rows, right_rows) = partition_rows(x, feature_idx, threshold);
    if left_rows.len() < min_samples_leaf || right_rows.len() < min_samples_leaf {
        return leaf_from(y);
    }

    let (left_x, left_y) = subset_by_rows(x, y, &left_rows);
    let (right_x, right_y) = subset_by_rows(x, y, &right_rows);

    let left = grow_tree(
        &left_x,
        &left_y,
        depth + 1,
        max_depth,
        min_samples_split,
        min_samples_leaf,
    );
    let right = grow_tree(
        &right_x,
        &right_y,
        depth + 1,
        max_depth,
        min_samples_split,
        min_samples_leaf,
    );

    RegressionTreeNode::Node(RegressionNode {
        feature_idx,
        threshold,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Builds a leaf predicting the mean of `y`.
fn leaf_from(y: &[f32]) -> RegressionTreeNode {
    let value = if y.is_empty() {
        0.0
    } else {
        y.iter().sum::<f32>() / y.len() as f32
    };
    RegressionTreeNode::Leaf(RegressionLeaf {
        value,
        n_samples: y.len(),
    })
}

/// Adds each split's sample-count weight to its feature's importance.
fn accumulate_importances(node: &RegressionTreeNode, importances: &mut [f32]) {
    if let RegressionTreeNode::Node(n) = node {
        importances[n.feature_idx] += subtree_samples(node) as f32;
        accumulate_importances(&n.left, importances);
        accumulate_importances(&n.right, importances);
    }
}

/// Total training samples under a node.
fn subtree_samples(node: &RegressionTreeNode) -> usize {
    match node {
        RegressionTreeNode::Leaf(leaf) => leaf.n_samples,
        RegressionTreeNode::Node(n) => subtree_samples(&n.left) + subtree_samples(&n.right),
    }
}

/// Creates a bootstrap sample (random draw with replacement).
///
/// Returns the row indices to include.
fn bootstrap_sample(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;

    let dist = Uniform::from(0..n_samples);
    let mut indices = Vec::with_capacity(n_samples);

    if let Some(seed) = random_state {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    } else {
        let mut rng = rand::thread_rng();
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    }

    indices
}

#[cfg(test)]
#[path = "regressor_tests.rs"]
mod regressor_tests;
