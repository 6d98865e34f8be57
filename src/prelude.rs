//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use esponja::prelude::*;
//! ```

pub use crate::error::{EsponjaError, Result};
pub use crate::metrics::{mse, pearson_correlation, r_squared};
pub use crate::predictor::{FitReport, SuitabilityPredictor};
pub use crate::preprocessing::StandardScaler;
pub use crate::primitives::{Matrix, Vector};
pub use crate::recommend::{top_k, Recommendation};
pub use crate::scoring::SuitabilityWeights;
pub use crate::synthetic::generate_sites;
pub use crate::table::{SiteTable, FEATURE_COLUMNS};
pub use crate::traits::{Estimator, Transformer};
