//! `[site]` section configuration.
//!
//! Contains the site base path, per-locale metadata, and raw head/meta tags
//! injected into every generated page.
//!
//! # Example
//!
//! ```toml
//! [site]
//! base = "/r-spatial-guide/"
//!
//! [site.locales."/"]
//! lang = "ja"
//! title = "Rを使った地理空間データの可視化と分析"
//! description = "地理空間データに関する操作や可視化、分析手法について解説します。"
//!
//! [[site.head]]
//! tag = "link"
//! attrs = { rel = "stylesheet", href = "https://cdn.example.com/katex.min.css" }
//!
//! [[site.meta]]
//! charset = "utf-8"
//!
//! [[site.meta]]
//! name = "viewport"
//! content = "width=device-width, initial-scale=1"
//! ```

use crate::config::types::{ConfigDiagnostics, DiagnosticKind, FieldPath};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path key of the default locale.
pub const ROOT_LOCALE: &str = "/";

/// Site-level configuration: base path, locales, head/meta tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// URL path prefix the site is deployed under (e.g. "/my-guide/").
    /// A full http(s) URL is accepted; its path component is used.
    pub base: String,

    /// Locale metadata keyed by path prefix. The `"/"` key is required.
    pub locales: FxHashMap<String, LocaleConfig>,

    /// Raw head elements, injected in declared order.
    pub head: Vec<HeadTag>,

    /// Meta tags, injected in declared order. Each entry is a free-form
    /// attribute map (`charset`, or `name` + `content`, ...).
    pub meta: Vec<BTreeMap<String, String>>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            base: "/".into(),
            locales: FxHashMap::default(),
            head: Vec::new(),
            meta: Vec::new(),
        }
    }
}

/// Metadata for one language/region variant of the site.
///
/// Defined once at configuration load, immutable thereafter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocaleConfig {
    /// BCP-47 language code (e.g. "ja", "en-US").
    pub lang: String,
    /// Site title for this locale.
    pub title: String,
    /// Site description for this locale.
    pub description: String,
}

/// A raw head element: tag name plus attribute map.
///
/// Declaration order is significant - it is the injection order into
/// generated page headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeadTag {
    /// Element name (e.g. "link", "script").
    pub tag: String,
    /// Attribute name to value.
    pub attrs: BTreeMap<String, String>,
}

impl SiteSectionConfig {
    /// Get the root (`"/"`) locale, if configured.
    pub fn root_locale(&self) -> Option<&LocaleConfig> {
        self.locales.get(ROOT_LOCALE)
    }

    /// Validate locales and head/meta tags.
    ///
    /// # Checks
    /// - `locales` is non-empty and contains the `"/"` key
    /// - every head tag carries its required attributes
    /// - every meta entry is a well-formed meta attribute set
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.locales.contains_key(ROOT_LOCALE) {
            diag.error_with_hint(
                DiagnosticKind::MissingRootLocale,
                FieldPath::new("site.locales"),
                if self.locales.is_empty() {
                    "no locales configured".to_string()
                } else {
                    format!(
                        "{} locale(s) configured but no \"/\" entry",
                        self.locales.len()
                    )
                },
                "add a [site.locales.\"/\"] table with lang, title and description",
            );
        }

        for (i, tag) in self.head.iter().enumerate() {
            tag.validate(&FieldPath::new("site.head").index(i), diag);
        }

        for (i, attrs) in self.meta.iter().enumerate() {
            validate_meta_attrs(attrs, &FieldPath::new("site.meta").index(i), diag);
        }
    }
}

impl HeadTag {
    /// Validate required attributes for this tag.
    fn validate(&self, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        if self.tag.is_empty() {
            diag.error(
                DiagnosticKind::MalformedHeadTag,
                field.clone(),
                "head tag has no tag name",
            );
            return;
        }

        match self.tag.as_str() {
            "link" => self.require_attr("href", field, diag),
            "script" => {
                // External scripts only; inline bodies belong in theme assets
                self.require_attr("src", field, diag);
            }
            "meta" => validate_meta_attrs(&self.attrs, field, diag),
            _ => {
                if self.attrs.is_empty() {
                    diag.error(
                        DiagnosticKind::MalformedHeadTag,
                        field.clone(),
                        format!("<{}> tag has no attributes", self.tag),
                    );
                }
            }
        }
    }

    fn require_attr(&self, name: &str, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        let missing = self.attrs.get(name).is_none_or(|v| v.is_empty());
        if missing {
            diag.error(
                DiagnosticKind::MalformedHeadTag,
                field.clone(),
                format!("<{}> tag requires a non-empty '{}' attribute", self.tag, name),
            );
        }
    }
}

/// A meta attribute set needs `charset`, or a `name`/`http-equiv` with content.
fn validate_meta_attrs(
    attrs: &BTreeMap<String, String>,
    field: &FieldPath,
    diag: &mut ConfigDiagnostics,
) {
    if attrs.contains_key("charset") {
        return;
    }

    let keyed = attrs.contains_key("name") || attrs.contains_key("http-equiv");
    if !keyed {
        diag.error(
            DiagnosticKind::MalformedHeadTag,
            field.clone(),
            "meta tag requires 'charset', 'name' or 'http-equiv'",
        );
    } else if attrs.get("content").is_none_or(|v| v.is_empty()) {
        diag.error(
            DiagnosticKind::MalformedHeadTag,
            field.clone(),
            "meta tag with 'name' or 'http-equiv' requires 'content'",
        );
    }
}
