//! Geometry error types.

use thiserror::Error;

/// Errors raised while validating geometry construction input.
///
/// Both variants are raised synchronously before any geometry work begins.
/// A failed construction never returns a partial mesh; the caller corrects
/// the input and retries the whole call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A required input is absent or below its minimum cardinality.
    #[error("missing input: {0}")]
    MissingInput(String),
    /// A provided value is out of range or inconsistent with other inputs.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
