//! Clipboard configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Clipboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy the generated HTML to the clipboard.
    pub copy: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        ClipboardConfig { copy: true }
    }
}
