//! Intermediate type representation produced by the transformer.
//!
//! Every node is exactly one [`TypeKind`] variant. Object shapes are an
//! explicit variant here; the untagged form where an object shape is a bare
//! map only exists at the wire boundary (see [`crate::wire`]).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping from definition (or field) name to its intermediate type.
pub type TypeMap = IndexMap<String, IntermediateType>;

/// Primitive kinds of the intermediate model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Date,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Number => "Number",
            Primitive::Boolean => "Boolean",
            Primitive::Date => "Date",
        }
    }
}

/// Structural variant of an intermediate node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Primitive {
        primitive: Primitive,
        /// Literal enumeration; only ever set on [`Primitive::String`].
        #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<Vec<Value>>,
    },
    /// Bare name of another definition. Resolution is left to the consumer.
    Reference { name: String },
    Array { items: Box<IntermediateType> },
    Object { fields: TypeMap },
}

/// A node of the intermediate tree plus its cross-cutting annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateType {
    #[serde(flatten)]
    pub kind: TypeKind,
    /// Set by the parent object shape when the field is listed in `required`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Base definitions inherited through `allOf`/`anyOf`. Never empty when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
}

impl IntermediateType {
    fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            required: false,
            extends: None,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(TypeKind::Primitive {
            primitive,
            enum_values: None,
        })
    }

    pub fn string_enum(values: Vec<Value>) -> Self {
        Self::new(TypeKind::Primitive {
            primitive: Primitive::String,
            enum_values: Some(values),
        })
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Reference { name: name.into() })
    }

    pub fn array(items: IntermediateType) -> Self {
        Self::new(TypeKind::Array {
            items: Box::new(items),
        })
    }

    pub fn object(fields: TypeMap) -> Self {
        Self::new(TypeKind::Object { fields })
    }

    /// Mark this node as a required field of its parent object.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attach inherited base names. An empty list leaves `extends` unset.
    pub fn with_extends(mut self, extends: Vec<String>) -> Self {
        self.extends = if extends.is_empty() {
            None
        } else {
            Some(extends)
        };
        self
    }

    /// Fields of an object shape, if this node is one.
    pub fn fields(&self) -> Option<&TypeMap> {
        match &self.kind {
            TypeKind::Object { fields } => Some(fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_extends_empty_stays_unset() {
        let node = IntermediateType::object(TypeMap::new()).with_extends(vec![]);
        assert_eq!(node.extends, None);

        let node = IntermediateType::object(TypeMap::new()).with_extends(vec!["Base".into()]);
        assert_eq!(node.extends, Some(vec!["Base".to_string()]));
    }

    #[test]
    fn test_tagged_serialization_shape() {
        let mut fields = TypeMap::new();
        fields.insert(
            "id".to_string(),
            IntermediateType::primitive(Primitive::Number).with_required(true),
        );
        fields.insert(
            "owner".to_string(),
            IntermediateType::reference("Owner"),
        );
        let node = IntermediateType::object(fields).with_extends(vec!["Base".into()]);

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            json!({
                "kind": "object",
                "fields": {
                    "id": {"kind": "primitive", "primitive": "Number", "required": true},
                    "owner": {"kind": "reference", "name": "Owner"}
                },
                "extends": ["Base"]
            })
        );

        let back: IntermediateType = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
