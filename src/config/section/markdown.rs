//! `[markdown]` section configuration.
//!
//! Options handed to the markdown rendering pipeline.
//!
//! # Example
//!
//! ```toml
//! [markdown]
//! line_numbers = true
//! anchor = { permalink = true }
//! extensions = ["katex"]
//! ```
//!
//! Extensions are applied in declared order; later extensions may depend on
//! transformations made by earlier ones.

use crate::config::types::{ConfigDiagnostics, DiagnosticKind, FieldPath};
use crate::render::ExtensionRegistry;
use serde::{Deserialize, Serialize};

/// Markdown rendering options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MarkdownSectionConfig {
    /// Show line numbers on fenced code blocks.
    pub line_numbers: bool,

    /// Heading anchor options.
    pub anchor: AnchorConfig,

    /// Extension ids, applied in declared order.
    pub extensions: Vec<String>,
}

/// Heading anchor options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnchorConfig {
    /// Render a visible permalink on each heading.
    pub permalink: bool,
}

impl MarkdownSectionConfig {
    /// Validate extension ids against the registry.
    pub fn validate(&self, registry: &ExtensionRegistry, diag: &mut ConfigDiagnostics) {
        let field = FieldPath::new("markdown.extensions");
        for (i, id) in self.extensions.iter().enumerate() {
            if !registry.contains(id) {
                diag.error_with_hint(
                    DiagnosticKind::UnknownMarkdownExtension,
                    field.index(i),
                    format!("unknown extension id '{id}'"),
                    format!("known extensions: {}", registry.known_ids().join(", ")),
                );
            }
        }
    }
}
