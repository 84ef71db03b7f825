//! Shared schema utilities for keyword lookup and path construction.
//!
//! Provides two concerns used by the transformer and the composition merge:
//! 1. **JSON Pointer building** (RFC 6901) for error and diagnostic paths
//! 2. **Keyword accessors** that decide when a schema keyword counts as present
//!
//! Presence follows the Swagger tooling convention this crate is compatible
//! with: `$ref` must be a non-empty string, `enum` any array, `properties`
//! any object. Everything else is treated as absent.

use std::borrow::Cow;

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// JSON Pointer escaping (RFC 6901)
// ---------------------------------------------------------------------------

/// Escape a single path segment per RFC 6901.
///
/// - `~` → `~0`
/// - `/` → `~1`
///
/// Returns `Cow::Borrowed` when no escaping is needed (the common case).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Build a JSON Pointer path by appending segments to a parent path.
///
/// # Example
/// ```
/// use swagger_ir_core::build_path;
/// assert_eq!(build_path("#", &["properties", "a/b"]), "#/properties/a~1b");
/// ```
pub fn build_path(parent: &str, segments: &[&str]) -> String {
    let mut path = parent.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&escape_pointer_segment(segment));
    }
    path
}

// ---------------------------------------------------------------------------
// $ref handling
// ---------------------------------------------------------------------------

/// Name a `$ref` points at: its last `/` segment, taken verbatim.
///
/// # Example
/// ```
/// use swagger_ir_core::reference_name;
/// assert_eq!(reference_name("#/definitions/Pet"), "Pet");
/// assert_eq!(reference_name("Pet"), "Pet");
/// ```
pub fn reference_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Definition name when `ref_path` is exactly `#/definitions/<Name>`.
///
/// Deeper pointers, external files and other namespaces return `None`.
pub fn local_definition_name(ref_path: &str) -> Option<&str> {
    let mut segments = ref_path.split('/');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some("#"), Some("definitions"), Some(name), None) => Some(name),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Keyword accessors
// ---------------------------------------------------------------------------

/// `$ref` value, if it is a non-empty string.
pub fn ref_path(schema: &Value) -> Option<&str> {
    schema
        .get("$ref")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Declared `type`, if it is a string.
pub fn type_name(schema: &Value) -> Option<&str> {
    schema.get("type").and_then(Value::as_str)
}

/// Declared `format`, if it is a string.
pub fn format_name(schema: &Value) -> Option<&str> {
    schema.get("format").and_then(Value::as_str)
}

/// `enum` literals, if present as an array.
pub fn enum_values(schema: &Value) -> Option<&Vec<Value>> {
    schema.get("enum").and_then(Value::as_array)
}

/// `properties` map, if present as an object.
pub fn properties(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

/// Whether `name` appears in the schema's `required` list.
///
/// A missing or non-array `required` lists nothing.
pub fn is_required(schema: &Value, name: &str) -> bool {
    schema
        .get("required")
        .and_then(Value::as_array)
        .is_some_and(|required| required.iter().any(|r| r.as_str() == Some(name)))
}
