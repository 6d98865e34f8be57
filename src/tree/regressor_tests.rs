use super::*;

fn regression_data() -> (Matrix<f32>, Vector<f32>) {
    // y = 2x with a little structure over two features
    let x = Matrix::from_vec(
        8,
        2,
        vec![
            1.0, 0.5, 2.0, 1.0, 3.0, 1.5, 4.0, 2.0, 5.0, 2.5, 6.0, 3.0, 7.0, 3.5, 8.0, 4.0,
        ],
    )
    .expect("matrix creation should succeed");
    let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
    (x, y)
}

// ====================================================================
// DecisionTreeRegressor
// ====================================================================

#[test]
fn test_tree_fit_predict_length() {
    let (x, y) = regression_data();
    let mut tree = DecisionTreeRegressor::new().with_max_depth(4);
    tree.fit(&x, &y).expect("fit should succeed");
    let preds = tree.predict(&x);
    assert_eq!(preds.len(), 8);
}

#[test]
fn test_tree_fits_training_data_closely() {
    let (x, y) = regression_data();
    let mut tree = DecisionTreeRegressor::new();
    tree.fit(&x, &y).expect("fit should succeed");
    let preds = tree.predict(&x);

    // Unconstrained depth on distinct targets: leaves memorize the data.
    for i in 0..preds.len() {
        assert!(
            (preds[i] - y[i]).abs() < 1e-5,
            "prediction {} differs from target {} at index {i}",
            preds[i],
            y[i]
        );
    }
}

#[test]
fn test_tree_max_depth_limits_depth() {
    let (x, y) = regression_data();
    let mut tree = DecisionTreeRegressor::new().with_max_depth(2);
    tree.fit(&x, &y).expect("fit should succeed");
    let depth = tree.root().expect("tree should exist").depth();
    assert!(depth <= 2, "depth = {depth}, expected <= 2");
}

#[test]
fn test_tree_fit_mismatched_samples() {
    let x = Matrix::from_vec(4, 2, vec![1.0; 8]).expect("matrix creation");
    let y = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let mut tree = DecisionTreeRegressor::new();
    assert!(tree.fit(&x, &y).is_err());
}

#[test]
fn test_tree_fit_zero_samples() {
    let x = Matrix::from_vec(0, 2, vec![]).expect("empty matrix");
    let y = Vector::from_slice(&[]);
    let mut tree = DecisionTreeRegressor::new();
    assert!(tree.fit(&x, &y).is_err());
}

#[test]
fn test_tree_constant_target_single_leaf() {
    let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("matrix");
    let y = Vector::from_slice(&[5.0, 5.0, 5.0, 5.0]);
    let mut tree = DecisionTreeRegressor::new();
    tree.fit(&x, &y).expect("fit should succeed");
    assert_eq!(tree.root().expect("tree should exist").depth(), 0);
    let preds = tree.predict(&x);
    assert!((preds[0] - 5.0).abs() < 1e-6);
}

#[test]
fn test_tree_score_on_training_data() {
    let (x, y) = regression_data();
    let mut tree = DecisionTreeRegressor::new();
    tree.fit(&x, &y).expect("fit should succeed");
    let r2 = tree.score(&x, &y);
    assert!(r2 > 0.99, "training R² = {r2}, expected near 1");
}

// ====================================================================
// RandomForestRegressor — construction
// ====================================================================

#[test]
fn test_forest_new_sets_n_estimators() {
    let rf = RandomForestRegressor::new(7);
    assert_eq!(rf.n_estimators(), 7);
    assert!(!rf.is_fitted());
}

#[test]
fn test_forest_default() {
    let rf = RandomForestRegressor::default();
    assert_eq!(rf.n_estimators(), 10);
}

// ====================================================================
// RandomForestRegressor — fit / predict
// ====================================================================

#[test]
fn test_forest_predict_returns_correct_length() {
    let (x, y) = regression_data();
    let mut rf = RandomForestRegressor::new(3)
        .with_max_depth(4)
        .with_random_state(42);
    rf.fit(&x, &y).expect("fit should succeed");
    let preds = rf.predict(&x);
    assert_eq!(preds.len(), 8);
}

#[test]
fn test_forest_predictions_near_targets() {
    let (x, y) = regression_data();
    let mut rf = RandomForestRegressor::new(10)
        .with_max_depth(5)
        .with_random_state(42);
    rf.fit(&x, &y).expect("fit should succeed");
    let preds = rf.predict(&x);

    for i in 0..preds.len() {
        assert!(
            (preds[i] - y[i]).abs() < 6.0,
            "prediction {} too far from target {} at index {i}",
            preds[i],
            y[i]
        );
    }
}

#[test]
fn test_forest_reproducible_with_random_state() {
    let (x, y) = regression_data();
    let mut rf1 = RandomForestRegressor::new(5)
        .with_max_depth(4)
        .with_random_state(42);
    rf1.fit(&x, &y).expect("fit should succeed");
    let preds1 = rf1.predict(&x);

    let mut rf2 = RandomForestRegressor::new(5)
        .with_max_depth(4)
        .with_random_state(42);
    rf2.fit(&x, &y).expect("fit should succeed");
    let preds2 = rf2.predict(&x);

    for i in 0..preds1.len() {
        assert!(
            (preds1[i] - preds2[i]).abs() < 1e-6,
            "predictions differ at index {i}"
        );
    }
}

#[test]
fn test_forest_different_seeds_differ() {
    let (x, y) = regression_data();
    let mut rf1 = RandomForestRegressor::new(5).with_random_state(42);
    rf1.fit(&x, &y).expect("fit should succeed");
    let mut rf2 = RandomForestRegressor::new(5).with_random_state(7);
    rf2.fit(&x, &y).expect("fit should succeed");

    let p1 = rf1.predict(&x);
    let p2 = rf2.predict(&x);
    let any_differ = (0..p1.len()).any(|i| (p1[i] - p2[i]).abs() > 1e-9);
    assert!(any_differ, "different seeds should produce different forests");
}

#[test]
fn test_forest_refit_replaces_trees() {
    let (x, y) = regression_data();
    let mut rf = RandomForestRegressor::new(3)
        .with_max_depth(3)
        .with_random_state(42);
    rf.fit(&x, &y).expect("first fit should succeed");
    let before = rf.predict(&x);
    rf.fit(&x, &y).expect("second fit should succeed");
    let after = rf.predict(&x);

    // Same data, same seed: the replacement state predicts identically.
    for i in 0..before.len() {
        assert!((before[i] - after[i]).abs() < 1e-6);
    }
}

#[test]
fn test_forest_fit_mismatched_samples() {
    let x = Matrix::from_vec(4, 2, vec![1.0; 8]).expect("matrix creation");
    let y = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let mut rf = RandomForestRegressor::new(3);
    assert!(rf.fit(&x, &y).is_err());
}

#[test]
fn test_forest_fit_zero_samples() {
    let x = Matrix::from_vec(0, 2, vec![]).expect("empty matrix");
    let y = Vector::from_slice(&[]);
    let mut rf = RandomForestRegressor::new(3);
    assert!(rf.fit(&x, &y).is_err());
}

#[test]
#[should_panic(expected = "Cannot predict with an unfitted random forest")]
fn test_forest_predict_before_fit_panics() {
    let rf = RandomForestRegressor::new(3);
    let x = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("matrix");
    let _ = rf.predict(&x);
}

#[test]
fn test_forest_single_row_training() {
    let x = Matrix::from_vec(1, 2, vec![1.0, 2.0]).expect("matrix");
    let y = Vector::from_slice(&[3.0]);
    let mut rf = RandomForestRegressor::new(3).with_random_state(42);
    rf.fit(&x, &y).expect("single-row fit should succeed");
    let preds = rf.predict(&x);
    assert!((preds[0] - 3.0).abs() < 1e-6);
}

// ====================================================================
// RandomForestRegressor — feature importances
// ====================================================================

#[test]
fn test_forest_importances_none_before_fit() {
    let rf = RandomForestRegressor::new(3);
    assert!(rf.feature_importances().is_none());
}

#[test]
fn test_forest_importances_sum_to_one() {
    let (x, y) = regression_data();
    let mut rf = RandomForestRegressor::new(5)
        .with_max_depth(4)
        .with_random_state(42);
    rf.fit(&x, &y).expect("fit should succeed");
    let imp = rf.feature_importances().expect("importances after fit");
    assert_eq!(imp.len(), 2);
    let sum: f32 = imp.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5, "importances sum to {sum}");
}

#[test]
fn test_forest_importances_nonnegative() {
    let (x, y) = regression_data();
    let mut rf = RandomForestRegressor::new(5)
        .with_max_depth(4)
        .with_random_state(42);
    rf.fit(&x, &y).expect("fit should succeed");
    let imp = rf.feature_importances().expect("importances after fit");
    for (i, &val) in imp.iter().enumerate() {
        assert!(val >= 0.0, "importance[{i}] = {val} should be >= 0");
    }
}

#[test]
fn test_forest_importance_tracks_informative_feature() {
    // Feature 0 drives the target; feature 1 is constant noise.
    let x = Matrix::from_vec(
        8,
        2,
        vec![
            1.0, 9.0, 2.0, 9.0, 3.0, 9.0, 4.0, 9.0, 5.0, 9.0, 6.0, 9.0, 7.0, 9.0, 8.0, 9.0,
        ],
    )
    .expect("matrix creation should succeed");
    let y = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

    let mut rf = RandomForestRegressor::new(10)
        .with_max_depth(4)
        .with_random_state(42);
    rf.fit(&x, &y).expect("fit should succeed");
    let imp = rf.feature_importances().expect("importances after fit");
    assert!(
        imp[0] > imp[1],
        "informative feature importance {} should beat constant {}",
        imp[0],
        imp[1]
    );
}
