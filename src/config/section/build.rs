//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "docs"       # markdown sources, relative to project root
//! output = "dist"        # generated site target
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build paths. Relative paths are resolved against the project root
/// (the config file's directory) during finalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Directory of markdown content sources.
    pub content: PathBuf,

    /// Target directory handed to the generator. Never written to during
    /// configuration resolution.
    pub output: PathBuf,

    /// Clean output directory before building (set from CLI, not TOML).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            output: PathBuf::from("dist"),
            clean: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(!config.build.clean);
    }

    #[test]
    fn test_custom_paths() {
        let config = test_parse_config("[build]\ncontent = \"docs\"\noutput = \"public\"");
        assert_eq!(config.build.content, PathBuf::from("docs"));
        assert_eq!(config.build.output, PathBuf::from("public"));
    }
}
