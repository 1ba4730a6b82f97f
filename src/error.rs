//! Error types for the recommendation core.
//!
//! I/O-facing code (ingestion, configuration, the binary) reports through
//! `anyhow`; everything that touches the matrices returns [`RecommendError`]
//! so callers can match on the failure kind.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The requested user has no row in the similarity matrix.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Onboarding was asked to register an identifier that already exists.
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    /// A neighbor or result count was not a usable non-negative integer.
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// A dense matrix could not be allocated during a rebuild.
    #[error("Matrix of {rows}x{cols} cells is too large to allocate")]
    MatrixTooLarge { rows: usize, cols: usize },
}

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Validates a signed count coming from outside the core.
///
/// Zero is accepted (it yields an empty recommendation list downstream);
/// negative values are rejected rather than clamped.
pub fn validate_count(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| RecommendError::InvalidParameter {
        name,
        value: value.to_string(),
    })
}

/// Parses and validates a count given as text.
pub fn parse_count(name: &'static str, raw: &str) -> Result<usize> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| RecommendError::InvalidParameter {
            name,
            value: raw.to_string(),
        })?;
    validate_count(name, value)
}
