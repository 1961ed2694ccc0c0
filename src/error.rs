//! Error types for schema construction.

use thiserror::Error;

/// Errors raised at the crate's fallible edges.
///
/// The mapping operation itself never fails: absent input degrades to an
/// empty result and unknown authentication types degrade to placeholder
/// descriptors. Only loading an application-supplied override table can
/// return an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchemaError {
    /// Override table JSON did not match the expected nested shape.
    #[error("invalid override table: {0}")]
    InvalidOverrides(#[from] serde_json::Error),
}
