//! Schema node → intermediate type transform.
//!
//! Rules are checked in a fixed order and the first match wins:
//!
//! | # | Condition                                  | Result                         |
//! |---|--------------------------------------------|--------------------------------|
//! | 1 | `$ref`                                     | reference to the last segment  |
//! | 2 | `enum`                                     | `String` with the enum values  |
//! | 3 | `type` is `integer`, `double` or `number`  | `Number`                       |
//! | 4 | `type` is `boolean`                        | `Boolean`                      |
//! | 5 | `type` is `string`                         | `Date` for date formats, else `String` |
//! | 6 | `type` is `object`, or `properties`        | object shape                   |
//! | 7 | `type` is `array`                          | array of `items`               |
//! | 8 | `allOf`                                    | merged object shape + extends  |
//! | 9 | `anyOf`                                    | same as `allOf`                |
//! | 10| `type` is `file`                           | `String`                       |
//!
//! Anything else is an [`ConvertError::UnsupportedSchemaType`]. Rule 2 runs
//! before the type rules, so an enum on an integer schema still becomes a
//! string enumeration.

use serde_json::Value;

use crate::composition::{merge_at, CompositionKey};
use crate::config::ConvertOptions;
use crate::diagnostics::DiagnosticSink;
use crate::error::ConvertError;
use crate::ir::{IntermediateType, Primitive, TypeMap};
use crate::schema_utils::{
    build_path, enum_values, format_name, is_required, properties, reference_name, ref_path,
    type_name,
};

/// Recursive descent over one schema tree.
pub struct Transformer<'a> {
    options: &'a ConvertOptions,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Transformer<'a> {
    pub fn new(options: &'a ConvertOptions, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { options, sink }
    }

    /// Transform the schema found at `path`.
    pub fn transform(
        &mut self,
        schema: &Value,
        path: &str,
    ) -> Result<IntermediateType, ConvertError> {
        self.walk(schema, path, 0)
    }

    fn walk(
        &mut self,
        schema: &Value,
        path: &str,
        depth: usize,
    ) -> Result<IntermediateType, ConvertError> {
        if depth > self.options.max_depth {
            return Err(ConvertError::RecursionDepthExceeded {
                path: path.to_string(),
                max_depth: self.options.max_depth,
            });
        }

        if let Some(target) = ref_path(schema) {
            return Ok(IntermediateType::reference(reference_name(target)));
        }

        if let Some(values) = enum_values(schema) {
            return Ok(IntermediateType::string_enum(values.clone()));
        }

        let ty = type_name(schema);
        match ty {
            Some("integer" | "double" | "number") => {
                return Ok(IntermediateType::primitive(Primitive::Number))
            }
            Some("boolean") => return Ok(IntermediateType::primitive(Primitive::Boolean)),
            Some("string") => {
                let primitive = match format_name(schema) {
                    Some("date" | "date-time") => Primitive::Date,
                    _ => Primitive::String,
                };
                return Ok(IntermediateType::primitive(primitive));
            }
            _ => {}
        }

        if ty == Some("object") || properties(schema).is_some() {
            return self.object_shape(schema, path, depth);
        }

        if ty == Some("array") {
            let items = schema
                .get("items")
                .ok_or_else(|| ConvertError::MissingItems {
                    path: path.to_string(),
                })?;
            let inner = self.walk(items, &build_path(path, &["items"]), depth + 1)?;
            return Ok(IntermediateType::array(inner));
        }

        if let Some(key) = CompositionKey::of(schema) {
            let merged = merge_at(schema, key, path, depth, self.options, &mut *self.sink)?;
            let node = self.walk(&merged.schema, path, depth + 1)?;
            return Ok(node.with_extends(merged.extends));
        }

        if ty == Some("file") {
            return Ok(IntermediateType::primitive(Primitive::String));
        }

        Err(ConvertError::UnsupportedSchemaType {
            path: path.to_string(),
            found: schema.get("type").cloned().unwrap_or(Value::Null),
        })
    }

    fn object_shape(
        &mut self,
        schema: &Value,
        path: &str,
        depth: usize,
    ) -> Result<IntermediateType, ConvertError> {
        let mut fields = TypeMap::new();
        for (name, prop) in properties(schema).into_iter().flatten() {
            let child_path = build_path(path, &["properties", name]);
            let field = self
                .walk(prop, &child_path, depth + 1)?
                .with_required(is_required(schema, name));
            fields.insert(name.clone(), field);
        }
        Ok(IntermediateType::object(fields))
    }
}
