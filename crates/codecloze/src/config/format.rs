//! Formatting configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FormatConfig {
    /// Language used when none is given on the command line.
    pub default_language: String,
    /// Print the source code to stderr before converting it.
    pub echo_source: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            default_language: "java".to_string(),
            echo_source: true,
        }
    }
}
