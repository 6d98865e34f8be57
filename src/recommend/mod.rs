//! Top-k site recommendation from a fitted predictor.

use crate::error::{EsponjaError, Result};
use crate::predictor::SuitabilityPredictor;
use crate::table::SiteTable;
use serde::{Deserialize, Serialize};

/// A recommended site: coordinates plus the predicted suitability score.
///
/// A projection of one scored table row; it borrows nothing and owns only
/// the three values a reporting layer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Site latitude
    pub latitude: f32,
    /// Site longitude
    pub longitude: f32,
    /// Predicted suitability score
    pub score: f32,
}

/// Selects the `k` highest-scoring sites from a table.
///
/// Scores every row with the fitted predictor, then returns the top `k`
/// rows ordered by descending predicted score. Ties keep the original
/// table order (first-seen wins), which makes the selection deterministic.
///
/// Policy: `k == 0` is rejected; `k` larger than the table clamps to the
/// row count.
///
/// # Errors
///
/// `InvalidArgument` for `k == 0`; `NotFitted` if the predictor has not
/// been fitted; `SchemaMismatch` if the table lacks a feature column or
/// the latitude/longitude columns.
///
/// # Examples
///
/// ```
/// use esponja::predictor::SuitabilityPredictor;
/// use esponja::recommend::top_k;
/// use esponja::synthetic::generate_sites;
///
/// let table = generate_sites(60, 11);
/// let mut predictor = SuitabilityPredictor::new(42).with_n_estimators(5);
/// predictor.fit(&table).expect("fit should succeed");
///
/// let picks = top_k(&predictor, &table, 5).expect("ranking should succeed");
/// assert_eq!(picks.len(), 5);
/// assert!(picks[0].score >= picks[4].score);
/// ```
pub fn top_k(
    predictor: &SuitabilityPredictor,
    table: &SiteTable,
    k: usize,
) -> Result<Vec<Recommendation>> {
    if k == 0 {
        return Err(EsponjaError::InvalidArgument {
            param: "k".to_string(),
            value: "0".to_string(),
            constraint: "k >= 1".to_string(),
        });
    }

    let scores = predictor.predict(table)?;
    let latitude = table.column("latitude")?;
    let longitude = table.column("longitude")?;

    let mut order: Vec<usize> = (0..table.n_rows()).collect();
    // Descending by score; the index itself breaks ties (stable sort).
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let k = k.min(table.n_rows());
    Ok(order[..k]
        .iter()
        .map(|&idx| Recommendation {
            latitude: latitude[idx],
            longitude: longitude[idx],
            score: scores[idx],
        })
        .collect())
}
