//! Non-fatal diagnostics emitted while converting.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A diagnostic produced during conversion. Never aborts the conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Schema location of the offending node (e.g. "#/definitions/Pet/allOf/1").
    pub path: String,
    /// Classification of the diagnostic.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
}

/// Classification of conversion diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A composition member that is neither a local reference nor carries
    /// `properties`. It contributes nothing to the merged schema.
    UnsupportedCompositionMember {
        /// The member schema as written in the document.
        member: Value,
    },
}

/// Receiver for conversion diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Default sink: logs every diagnostic through `tracing` and keeps it.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub collected: Vec<Diagnostic>,
}

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(path = %diagnostic.path, "{}", diagnostic.message);
        self.collected.push(diagnostic);
    }
}
