//! Error types for schema conversion.

use serde_json::Value;
use thiserror::Error;

use crate::composition::CompositionKey;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("No definition found in definitions")]
    NoDefinitions,

    #[error("Unsupported schema type at {path}: {found}")]
    UnsupportedSchemaType { path: String, found: Value },

    #[error("Missing composition member `{key}` at {path}")]
    MissingCompositionMember { path: String, key: CompositionKey },

    #[error("Array schema without `items` at {path}")]
    MissingItems { path: String },

    #[error("Recursion depth exceeded at {path} (max: {max_depth})")]
    RecursionDepthExceeded { path: String, max_depth: usize },

    #[error("Field `{field}` at {path} collides with a wire marker key")]
    MarkerCollision { path: String, field: String },
}
