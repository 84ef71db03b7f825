//! Configuration for schema conversion.

use serde::{Deserialize, Serialize};

/// Marker key naming used by the untagged wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStyle {
    /// `__type__`, `__reference__`, `__array__`, `__extends__`.
    #[default]
    Dunder,
    /// `type`, `reference`, `array`, `extends`.
    Plain,
}

/// Options for schema conversion.
///
/// Fields are serialized in `kebab-case` (e.g., `max-depth`) so the same
/// shape works in config files and on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConvertOptions {
    /// Maximum schema nesting depth before the transform gives up
    /// (stack overflow guard). Default: 50.
    pub max_depth: usize,
    /// Marker naming for [`crate::wire::encode`]. Default: dunder.
    pub markers: MarkerStyle,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: 50,
            markers: MarkerStyle::Dunder,
        }
    }
}
