//! Esponja: sponge-park site suitability scoring and recommendation.
//!
//! Ranks candidate geographic sites for stormwater-absorbing "sponge park"
//! installations. A hand-designed weighted heuristic labels training data,
//! a random forest learns to reproduce and generalize those labels over a
//! wider feature set, and a ranking step returns the top-scoring sites.
//!
//! # Quick Start
//!
//! ```
//! use esponja::prelude::*;
//!
//! // A table of synthetic candidate sites (any conforming table works)
//! let table = generate_sites(200, 7);
//!
//! // Train the predictor; diagnostics come back as a value
//! let mut predictor = SuitabilityPredictor::new(42).with_n_estimators(10);
//! let report = predictor.fit(&table).expect("fit should succeed");
//! assert!(report.train_r2 > 0.0);
//!
//! // Rank the five most suitable sites
//! let picks = top_k(&predictor, &table, 5).expect("ranking should succeed");
//! assert_eq!(picks.len(), 5);
//! assert!(picks[0].score >= picks[4].score);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`table`]: `SiteTable` named-column container and the feature schema
//! - [`scoring`]: The frozen suitability weight set and label derivation
//! - [`preprocessing`]: Feature standardization
//! - [`tree`]: Regression trees and the random forest ensemble
//! - [`model_selection`]: Train/test splitting
//! - [`metrics`]: R², MSE, Pearson correlation
//! - [`predictor`]: The fit/predict pipeline and its fit diagnostics
//! - [`recommend`]: Top-k site selection
//! - [`synthetic`]: Seeded synthetic site generation

pub mod error;
pub mod metrics;
pub mod model_selection;
pub mod predictor;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod recommend;
pub mod scoring;
pub mod synthetic;
pub mod table;
pub mod traits;
pub mod tree;

pub use error::{EsponjaError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::{Estimator, Transformer};
