//! Markdown extension registry.
//!
//! The resolver validates extension ids against this registry; the rendering
//! pipeline asks it for the pulldown-cmark option flags each id enables.
//! Extensions are applied in the order they are declared in
//! `markdown.extensions`, since later extensions may build on earlier ones.

use pulldown_cmark::Options;

/// One registered extension capability.
#[derive(Debug, Clone, Copy)]
pub struct Extension {
    /// Stable id used in `markdown.extensions`.
    pub id: &'static str,
    /// Parser options this extension enables.
    pub options: Options,
}

/// Registry of known markdown extensions.
///
/// External syntax capabilities live in pulldown-cmark; this registry only
/// maps ids to the flags that switch them on.
#[derive(Debug, Clone)]
pub struct ExtensionRegistry {
    entries: Vec<Extension>,
}

impl ExtensionRegistry {
    /// Registry with all built-in extensions.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                // Math notation rendered to KaTeX-ready markup
                Extension {
                    id: "katex",
                    options: Options::ENABLE_MATH,
                },
                Extension {
                    id: "footnotes",
                    options: Options::ENABLE_FOOTNOTES,
                },
                Extension {
                    id: "tables",
                    options: Options::ENABLE_TABLES,
                },
                Extension {
                    id: "strikethrough",
                    options: Options::ENABLE_STRIKETHROUGH,
                },
                Extension {
                    id: "tasklists",
                    options: Options::ENABLE_TASKLISTS,
                },
                Extension {
                    id: "smart-punctuation",
                    options: Options::ENABLE_SMART_PUNCTUATION,
                },
            ],
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Ids of all registered extensions, in registration order.
    pub fn known_ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Union of option flags for the given ids, in declared order.
    ///
    /// Unknown ids are skipped; validation has already rejected them.
    pub fn options_for(&self, ids: &[String]) -> Options {
        let mut options = Options::empty();
        for id in ids {
            if let Some(ext) = self.entries.iter().find(|e| e.id == id) {
                options.insert(ext.options);
            }
        }
        options
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
