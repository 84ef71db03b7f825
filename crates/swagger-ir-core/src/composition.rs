//! Composition merge (`allOf` / `anyOf` flattening)
//!
//! Folds the members of a composition into one synthetic object schema plus
//! an `extends` list:
//!
//! - A member `{"$ref": "#/definitions/<Name>"}` is inheritance. `<Name>` is
//!   appended to `extends` and none of its structure is merged.
//! - Any other member contributes its `properties`. A member that is itself a
//!   composition is pre-merged first, and only its properties survive.
//! - Property collisions are last-writer-wins.
//!
//! `anyOf` goes through exactly the same merge as `allOf`; there is no union
//! variant in the intermediate model.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::ConvertOptions;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::ConvertError;
use crate::schema_utils::{build_path, local_definition_name, properties, ref_path};

/// Composition keyword a merge is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositionKey {
    #[serde(rename = "allOf")]
    AllOf,
    #[serde(rename = "anyOf")]
    AnyOf,
}

impl CompositionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositionKey::AllOf => "allOf",
            CompositionKey::AnyOf => "anyOf",
        }
    }

    /// Composition keyword carried by `schema`, `allOf` taking precedence.
    pub fn of(schema: &Value) -> Option<Self> {
        [CompositionKey::AllOf, CompositionKey::AnyOf]
            .into_iter()
            .find(|key| schema.get(key.as_str()).is_some_and(Value::is_array))
    }
}

impl fmt::Display for CompositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of flattening one composition.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedComposition {
    /// Synthetic `{"type": "object", "properties": {...}}` schema.
    pub schema: Value,
    /// Local definitions inherited from, in first-seen order (duplicates kept).
    pub extends: Vec<String>,
}

/// Flatten the `key` composition of `schema`.
///
/// `path` is the schema location of `schema`, used for errors and diagnostics.
/// Members that contribute nothing are reported to `sink`. Nested
/// compositions deeper than `options.max_depth` fail with
/// [`ConvertError::RecursionDepthExceeded`].
pub fn merge_composition(
    schema: &Value,
    key: CompositionKey,
    path: &str,
    options: &ConvertOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<MergedComposition, ConvertError> {
    merge_at(schema, key, path, 0, options, sink)
}

/// [`merge_composition`] starting at nesting level `depth`.
pub(crate) fn merge_at(
    schema: &Value,
    key: CompositionKey,
    path: &str,
    depth: usize,
    options: &ConvertOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<MergedComposition, ConvertError> {
    if depth > options.max_depth {
        return Err(ConvertError::RecursionDepthExceeded {
            path: path.to_string(),
            max_depth: options.max_depth,
        });
    }

    let members = schema
        .get(key.as_str())
        .and_then(Value::as_array)
        .ok_or_else(|| ConvertError::MissingCompositionMember {
            path: path.to_string(),
            key,
        })?;

    let mut merged = Map::new();
    let mut extends = Vec::new();

    for (i, member) in members.iter().enumerate() {
        let member_path = build_path(path, &[key.as_str(), &i.to_string()]);

        if let Some(name) = ref_path(member).and_then(local_definition_name) {
            extends.push(name.to_string());
            continue;
        }

        let pre_merged;
        let contributor = match CompositionKey::of(member) {
            Some(nested) => {
                pre_merged =
                    merge_at(member, nested, &member_path, depth + 1, options, sink)?.schema;
                &pre_merged
            }
            None => member,
        };

        let Some(props) = properties(contributor) else {
            sink.emit(Diagnostic {
                path: member_path,
                kind: DiagnosticKind::UnsupportedCompositionMember {
                    member: member.clone(),
                },
                message: format!("{key} merge: unsupported object type at {member}"),
            });
            continue;
        };

        for (name, prop) in props {
            if merged.insert(name.clone(), prop.clone()).is_some() {
                tracing::debug!(
                    path = %member_path,
                    property = %name,
                    "property overwritten by later composition member"
                );
            }
        }
    }

    Ok(MergedComposition {
        schema: json!({ "type": "object", "properties": merged }),
        extends,
    })
}
