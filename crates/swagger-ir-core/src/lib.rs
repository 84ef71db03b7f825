//! # swagger-ir-core
//!
//! Convert the `definitions` of a Swagger document into a normalized
//! intermediate type representation: a mapping from definition name to a
//! tree of primitives, references, arrays and object shapes, with
//! inheritance found in `allOf`/`anyOf` flattened into an `extends` list.
//!
//! ```
//! use serde_json::json;
//! use swagger_ir_core::{convert, ConvertOptions, IntermediateType};
//!
//! let doc = json!({
//!     "definitions": {
//!         "Tag": { "type": "object", "properties": { "name": { "type": "string" } } },
//!         "Tags": { "type": "array", "items": { "$ref": "#/definitions/Tag" } }
//!     }
//! });
//! let result = convert(&doc, &ConvertOptions::default()).unwrap();
//! assert_eq!(
//!     result.types["Tags"],
//!     IntermediateType::array(IntermediateType::reference("Tag"))
//! );
//! ```

pub mod composition;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ir;
pub mod schema_utils;
pub mod transform;
pub mod wire;

pub use composition::{merge_composition, CompositionKey, MergedComposition};
pub use config::{ConvertOptions, MarkerStyle};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use error::ConvertError;
pub use ir::{IntermediateType, Primitive, TypeKind, TypeMap};
pub use schema_utils::{build_path, reference_name};
pub use transform::Transformer;

use serde::Serialize;
use serde_json::Value;

/// Key of the definitions section in the input document.
pub const DEFINITIONS_KEY: &str = "definitions";

/// Output of [`convert`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    /// Definition name → intermediate type, in input order.
    pub types: TypeMap,
    /// Non-fatal diagnostics, in the order they were produced.
    pub warnings: Vec<Diagnostic>,
    /// Marker style taken from [`ConvertOptions::markers`].
    #[serde(skip)]
    pub markers: MarkerStyle,
}

impl Conversion {
    /// Untagged wire form of [`Conversion::types`], using the marker style
    /// the conversion was run with.
    pub fn to_wire(&self) -> Result<Value, ConvertError> {
        wire::encode(&self.types, self.markers)
    }
}

/// Convert every definition of `document`.
///
/// Diagnostics are logged through `tracing` and returned in
/// [`Conversion::warnings`].
pub fn convert(document: &Value, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let mut sink = TracingSink::default();
    let types = convert_with_sink(document, options, &mut sink)?;
    Ok(Conversion {
        types,
        warnings: sink.collected,
        markers: options.markers,
    })
}

/// Convert every definition of `document`, reporting diagnostics to `sink`.
///
/// Fails with [`ConvertError::NoDefinitions`] when `definitions` is missing,
/// not an object or empty. The first failing definition aborts the whole
/// conversion.
pub fn convert_with_sink(
    document: &Value,
    options: &ConvertOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<TypeMap, ConvertError> {
    let definitions = document
        .get(DEFINITIONS_KEY)
        .and_then(Value::as_object)
        .filter(|defs| !defs.is_empty())
        .ok_or(ConvertError::NoDefinitions)?;

    let mut transformer = Transformer::new(options, sink);
    let mut types = TypeMap::with_capacity(definitions.len());
    for (name, schema) in definitions {
        let path = build_path("#", &[DEFINITIONS_KEY, name]);
        tracing::debug!(definition = %name, "converting definition");
        types.insert(name.clone(), transformer.transform(schema, &path)?);
    }
    Ok(types)
}

/// Transform a single schema node with default options.
///
/// Diagnostics are logged through `tracing` only.
pub fn type_template(schema: &Value) -> Result<IntermediateType, ConvertError> {
    let options = ConvertOptions::default();
    let mut sink = TracingSink::default();
    Transformer::new(&options, &mut sink).transform(schema, "#")
}
