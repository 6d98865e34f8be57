//! `SiteTable`: named-column container for candidate site records.
//!
//! One row per candidate site, one column per attribute. Row order is
//! preserved from construction through scoring and ranking, which is what
//! makes tie-breaking in top-k selection deterministic.

use crate::error::{EsponjaError, Result};
use crate::primitives::{Matrix, Vector};

/// The feature columns the predictor trains on, in their fixed order.
///
/// A superset of the weighted suitability attributes: the model is free to
/// pick up relationships in columns the hand-crafted heuristic ignores.
pub const FEATURE_COLUMNS: [&str; 15] = [
    "latitude",
    "longitude",
    "flood_risk",
    "elevation",
    "proximity_to_water",
    "green_space_density",
    "population_density",
    "impervious_surface_ratio",
    "annual_rainfall",
    "heat_island_intensity",
    "distance_to_storm_drains",
    "soil_permeability",
    "land_availability",
    "property_value",
    "community_support",
];

/// A table of candidate sites with named `f32` columns.
///
/// Thin wrapper around `Vec<(String, Vector<f32>)>`. Scoring and scaling
/// never mutate a table in place; transforms return new matrices.
///
/// # Examples
///
/// ```
/// use esponja::table::SiteTable;
/// use esponja::primitives::Vector;
///
/// let columns = vec![
///     ("latitude".to_string(), Vector::from_slice(&[43.6, 43.7])),
///     ("longitude".to_string(), Vector::from_slice(&[-79.4, -79.3])),
/// ];
/// let table = SiteTable::new(columns).expect("columns have equal lengths");
/// assert_eq!(table.shape(), (2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct SiteTable {
    columns: Vec<(String, Vector<f32>)>,
    n_rows: usize,
}

impl SiteTable {
    /// Creates a new `SiteTable` from named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no columns, columns have different
    /// lengths, a name is empty, or names are duplicated.
    pub fn new(columns: Vec<(String, Vector<f32>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err("SiteTable must have at least one column".into());
        }

        let n_rows = columns[0].1.len();

        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err(EsponjaError::ShapeMismatch {
                    expected: format!("{n_rows} rows in every column"),
                    actual: format!("column '{name}' has {} rows", col.len()),
                });
            }
            if name.is_empty() {
                return Err("column names cannot be empty".into());
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        for i in 1..names.len() {
            if names[i] == names[i - 1] {
                return Err("duplicate column names not allowed".into());
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns true if a column with the given name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Returns a reference to a column by name.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&Vector<f32>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| EsponjaError::SchemaMismatch {
                column: name.to_string(),
            })
    }

    /// Assembles the feature matrix for the declared [`FEATURE_COLUMNS`],
    /// in their fixed order, matching columns by name.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the table has zero rows, and
    /// `SchemaMismatch` naming the first feature column that is absent.
    pub fn feature_matrix(&self) -> Result<Matrix<f32>> {
        if self.n_rows == 0 {
            return Err(EsponjaError::empty_input("site table"));
        }

        let mut selected = Vec::with_capacity(FEATURE_COLUMNS.len());
        for &name in &FEATURE_COLUMNS {
            selected.push(self.column(name)?);
        }

        let n_cols = selected.len();
        let mut data = Vec::with_capacity(self.n_rows * n_cols);
        for row in 0..self.n_rows {
            for col in &selected {
                data.push(col[row]);
            }
        }

        Matrix::from_vec(self.n_rows, n_cols, data).map_err(Into::into)
    }

    /// Returns an iterator over columns as (name, vector) pairs.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &Vector<f32>)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> SiteTable {
        SiteTable::new(vec![
            ("latitude".to_string(), Vector::from_slice(&[43.6, 43.7])),
            ("longitude".to_string(), Vector::from_slice(&[-79.4, -79.3])),
        ])
        .expect("table creation should succeed")
    }

    #[test]
    fn test_new_valid() {
        let table = two_column_table();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.column_names(), vec!["latitude", "longitude"]);
    }

    #[test]
    fn test_new_rejects_unequal_lengths() {
        let result = SiteTable::new(vec![
            ("a".to_string(), Vector::from_slice(&[1.0, 2.0])),
            ("b".to_string(), Vector::from_slice(&[1.0])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let result = SiteTable::new(vec![
            ("a".to_string(), Vector::from_slice(&[1.0])),
            ("a".to_string(), Vector::from_slice(&[2.0])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let result = SiteTable::new(vec![(String::new(), Vector::from_slice(&[1.0]))]);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_lookup() {
        let table = two_column_table();
        let lat = table.column("latitude").expect("column exists");
        assert_eq!(lat.as_slice(), &[43.6, 43.7]);
    }

    #[test]
    fn test_column_missing_is_schema_mismatch() {
        let table = two_column_table();
        let err = table.column("flood_risk").unwrap_err();
        assert!(matches!(
            err,
            EsponjaError::SchemaMismatch { column } if column == "flood_risk"
        ));
    }

    #[test]
    fn test_feature_matrix_missing_column() {
        let table = two_column_table();
        let err = table.feature_matrix().unwrap_err();
        // latitude and longitude exist; flood_risk is the first absent one
        assert!(matches!(
            err,
            EsponjaError::SchemaMismatch { column } if column == "flood_risk"
        ));
    }

    #[test]
    fn test_feature_matrix_full_schema() {
        let columns: Vec<(String, Vector<f32>)> = FEATURE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (
                    (*name).to_string(),
                    Vector::from_slice(&[i as f32, i as f32 + 0.5]),
                )
            })
            .collect();
        let table = SiteTable::new(columns).expect("full schema table");

        let m = table.feature_matrix().expect("feature matrix should build");
        assert_eq!(m.shape(), (2, 15));
        // Row-major: row 0 holds each column's first value, in declared order.
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 14), 14.0);
        assert_eq!(m.get(1, 2), 2.5);
    }

    #[test]
    fn test_feature_matrix_zero_rows() {
        let columns: Vec<(String, Vector<f32>)> = FEATURE_COLUMNS
            .iter()
            .map(|name| ((*name).to_string(), Vector::from_vec(vec![])))
            .collect();
        let table = SiteTable::new(columns).expect("empty table is constructible");
        let err = table.feature_matrix().unwrap_err();
        assert!(matches!(err, EsponjaError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_feature_matrix_ignores_extra_columns() {
        let mut columns: Vec<(String, Vector<f32>)> = FEATURE_COLUMNS
            .iter()
            .map(|name| ((*name).to_string(), Vector::from_slice(&[1.0])))
            .collect();
        columns.push(("ownership".to_string(), Vector::from_slice(&[3.0])));
        let table = SiteTable::new(columns).expect("table with extra column");

        let m = table.feature_matrix().expect("feature matrix should build");
        assert_eq!(m.n_cols(), 15);
    }
}
