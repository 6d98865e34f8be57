//! Error types for esponja operations.
//!
//! Every error in this crate reflects a caller contract violation (missing
//! columns, unfitted models, out-of-range arguments), never an environmental
//! failure, so none of them is retryable.

use std::fmt;

/// Main error type for esponja operations.
///
/// Provides detailed context about failures: shape and schema problems in
/// site tables, calls on unfitted pipeline state, and invalid arguments.
///
/// # Examples
///
/// ```
/// use esponja::error::EsponjaError;
///
/// let err = EsponjaError::ShapeMismatch {
///     expected: "15 feature columns".to_string(),
///     actual: "12 columns".to_string(),
/// };
/// assert!(err.to_string().contains("shape mismatch"));
/// ```
#[derive(Debug)]
pub enum EsponjaError {
    /// Table or matrix shape doesn't satisfy the operation (empty input,
    /// missing feature columns at fit time, dimension mismatch).
    ShapeMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Operation requires a fitted component (`fit` has not been called).
    NotFitted {
        /// The component or operation that needs fitting first
        what: String,
    },

    /// A column required at fit time is absent from a predict-time table.
    SchemaMismatch {
        /// Name of the missing column
        column: String,
    },

    /// Invalid argument value provided.
    InvalidArgument {
        /// Argument name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for EsponjaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EsponjaError::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, got {actual}")
            }
            EsponjaError::NotFitted { what } => {
                write!(f, "{what} is not fitted. Call fit() first")
            }
            EsponjaError::SchemaMismatch { column } => {
                write!(f, "schema mismatch: required column '{column}' is missing")
            }
            EsponjaError::InvalidArgument {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid argument: {param} = {value}, expected {constraint}"
                )
            }
            EsponjaError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EsponjaError {}

impl From<&str> for EsponjaError {
    fn from(msg: &str) -> Self {
        EsponjaError::Other(msg.to_string())
    }
}

impl From<String> for EsponjaError {
    fn from(msg: String) -> Self {
        EsponjaError::Other(msg)
    }
}

impl EsponjaError {
    /// Create a shape mismatch error with descriptive context.
    #[must_use]
    pub fn shape_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::ShapeMismatch {
            expected: format!("at least one row in {context}"),
            actual: "0 rows".to_string(),
        }
    }

    /// Create a not-fitted error.
    #[must_use]
    pub fn not_fitted(what: &str) -> Self {
        Self::NotFitted {
            what: what.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, EsponjaError>;
