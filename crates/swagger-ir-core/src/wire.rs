//! Untagged wire encoding consumed by downstream code generators.
//!
//! | Variant     | Encoding                                       |
//! |-------------|------------------------------------------------|
//! | Primitive   | `{ <type>: "String", "enum"?: [...] }`         |
//! | Reference   | `{ <reference>: "Name" }`                      |
//! | Array       | `{ <array>: <inner> }`                         |
//! | ObjectShape | bare map of field name → node                  |
//!
//! Any node may also carry `"required": true` and `<extends>: [...]`.
//! Object shapes have no tag of their own, so a field named like a marker
//! would be misread. Encoding rejects such fields with
//! [`ConvertError::MarkerCollision`].

use serde_json::{json, Map, Value};

use crate::config::MarkerStyle;
use crate::error::ConvertError;
use crate::ir::{IntermediateType, TypeKind, TypeMap};
use crate::schema_utils::build_path;

const ENUM: &str = "enum";
const REQUIRED: &str = "required";

/// Marker key names for one [`MarkerStyle`].
#[derive(Debug, Clone, Copy)]
struct Markers {
    ty: &'static str,
    reference: &'static str,
    array: &'static str,
    extends: &'static str,
}

impl Markers {
    fn for_style(style: MarkerStyle) -> Self {
        match style {
            MarkerStyle::Dunder => Markers {
                ty: "__type__",
                reference: "__reference__",
                array: "__array__",
                extends: "__extends__",
            },
            MarkerStyle::Plain => Markers {
                ty: "type",
                reference: "reference",
                array: "array",
                extends: "extends",
            },
        }
    }

    fn collides(&self, field: &str) -> bool {
        [
            self.ty,
            self.reference,
            self.array,
            self.extends,
            ENUM,
            REQUIRED,
        ]
        .contains(&field)
    }
}

/// Encode a full definitions mapping.
pub fn encode(types: &TypeMap, style: MarkerStyle) -> Result<Value, ConvertError> {
    let markers = Markers::for_style(style);
    let mut out = Map::new();
    for (name, node) in types {
        let path = build_path("#/definitions", &[name]);
        out.insert(name.clone(), encode_node(node, &markers, &path)?);
    }
    Ok(Value::Object(out))
}

/// Encode a single node.
pub fn encode_type(node: &IntermediateType, style: MarkerStyle) -> Result<Value, ConvertError> {
    encode_node(node, &Markers::for_style(style), "#")
}

fn encode_node(
    node: &IntermediateType,
    markers: &Markers,
    path: &str,
) -> Result<Value, ConvertError> {
    let mut out = Map::new();
    match &node.kind {
        TypeKind::Primitive {
            primitive,
            enum_values,
        } => {
            out.insert(markers.ty.to_string(), json!(primitive.as_str()));
            if let Some(values) = enum_values {
                out.insert(ENUM.to_string(), Value::Array(values.clone()));
            }
        }
        TypeKind::Reference { name } => {
            out.insert(markers.reference.to_string(), json!(name));
        }
        TypeKind::Array { items } => {
            let inner = encode_node(items, markers, &build_path(path, &["items"]))?;
            out.insert(markers.array.to_string(), inner);
        }
        TypeKind::Object { fields } => {
            for (field, child) in fields {
                let child_path = build_path(path, &["properties", field]);
                if markers.collides(field) {
                    return Err(ConvertError::MarkerCollision {
                        path: child_path,
                        field: field.clone(),
                    });
                }
                out.insert(field.clone(), encode_node(child, markers, &child_path)?);
            }
        }
    }

    if node.required {
        out.insert(REQUIRED.to_string(), Value::Bool(true));
    }
    if let Some(extends) = &node.extends {
        out.insert(markers.extends.to_string(), json!(extends));
    }
    Ok(Value::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Primitive;
    use pretty_assertions::assert_eq;

    fn pet() -> IntermediateType {
        let mut fields = TypeMap::new();
        fields.insert(
            "name".to_string(),
            IntermediateType::primitive(Primitive::String).with_required(true),
        );
        fields.insert(
            "status".to_string(),
            IntermediateType::string_enum(vec![json!("available"), json!("sold")]),
        );
        fields.insert(
            "tags".to_string(),
            IntermediateType::array(IntermediateType::reference("Tag")),
        );
        IntermediateType::object(fields).with_extends(vec!["Animal".into()])
    }

    #[test]
    fn test_encode_dunder() {
        let encoded = encode_type(&pet(), MarkerStyle::Dunder).unwrap();
        assert_eq!(
            encoded,
            json!({
                "name": { "__type__": "String", "required": true },
                "status": { "__type__": "String", "enum": ["available", "sold"] },
                "tags": { "__array__": { "__reference__": "Tag" } },
                "__extends__": ["Animal"]
            })
        );
    }

    #[test]
    fn test_encode_plain() {
        let encoded = encode_type(&pet(), MarkerStyle::Plain).unwrap();
        assert_eq!(
            encoded,
            json!({
                "name": { "type": "String", "required": true },
                "status": { "type": "String", "enum": ["available", "sold"] },
                "tags": { "array": { "reference": "Tag" } },
                "extends": ["Animal"]
            })
        );
    }

    #[test]
    fn test_plain_rejects_type_field() {
        let mut fields = TypeMap::new();
        fields.insert(
            "type".to_string(),
            IntermediateType::primitive(Primitive::String),
        );
        let mut types = TypeMap::new();
        types.insert("Event".to_string(), IntermediateType::object(fields));

        let err = encode(&types, MarkerStyle::Plain).unwrap_err();
        match err {
            ConvertError::MarkerCollision { path, field } => {
                assert_eq!(path, "#/definitions/Event/properties/type");
                assert_eq!(field, "type");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Dunder markers leave `type` free.
        assert!(encode(&types, MarkerStyle::Dunder).is_ok());
    }

    #[test]
    fn test_both_styles_reject_required_field() {
        let mut fields = TypeMap::new();
        fields.insert(
            "required".to_string(),
            IntermediateType::primitive(Primitive::Boolean),
        );
        let node = IntermediateType::object(fields);
        assert!(encode_type(&node, MarkerStyle::Dunder).is_err());
        assert!(encode_type(&node, MarkerStyle::Plain).is_err());
    }
}
