//! `[theme]` section configuration.
//!
//! Navigation bar items, sidebar reading order, and repository/edit-link
//! settings.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! sidebar = ["/", "introduction", "raster"]
//! repo = "tsukubar/r-spatial-guide"
//! repo_label = "GitHub"
//! docs_repo = "tsukubar/r-spatial-guide"
//! docs_dir = "docs"
//! edit_links = true
//! edit_link_text = "このページを編集する"
//! last_updated = true
//!
//! [[theme.nav]]
//! text = "Home"
//! link = "/"
//!
//! [[theme.nav]]
//! text = "1. 地理空間データ操作"
//! link = "/introduction"
//! ```
//!
//! Sidebar entries are either page paths or nested groups:
//!
//! ```toml
//! sidebar = ["/", { title = "Analysis", children = ["raster", "statistical-learning"] }]
//! ```

use crate::config::types::{ConfigDiagnostics, DiagnosticKind, FieldPath};
use crate::content::PageStore;
use serde::{Deserialize, Serialize};

/// Fallback label for edit links when `edit_link_text` is not set.
pub const DEFAULT_EDIT_LINK_TEXT: &str = "Edit this page";

/// Theme settings: navigation, sidebar, repository links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeSectionConfig {
    /// Top-level navigation links, shown in declared order.
    pub nav: Vec<NavItem>,

    /// Sidebar entries in reading order.
    pub sidebar: Vec<SidebarEntry>,

    /// Project repository (`owner/name` shorthand or full URL).
    pub repo: Option<String>,

    /// Label for the repository nav link.
    pub repo_label: String,

    /// Repository holding the documentation sources, for edit links.
    /// Falls back to `repo` when unset.
    pub docs_repo: Option<String>,

    /// Directory of the documentation sources inside `docs_repo`.
    pub docs_dir: String,

    /// Show an edit link on every page.
    pub edit_links: bool,

    /// Edit link label.
    pub edit_link_text: String,

    /// Show a last-updated stamp from the source file mtime.
    pub last_updated: bool,
}

impl Default for ThemeSectionConfig {
    fn default() -> Self {
        Self {
            nav: Vec::new(),
            sidebar: Vec::new(),
            repo: None,
            repo_label: "Source".into(),
            docs_repo: None,
            docs_dir: String::new(),
            edit_links: false,
            edit_link_text: DEFAULT_EDIT_LINK_TEXT.into(),
            last_updated: false,
        }
    }
}

/// A top-level navigation link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    /// Display text.
    pub text: String,
    /// Internal page path ("/introduction") or external URL.
    pub link: String,
}

/// One sidebar entry: a page path, or a titled group of entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Leaf page path, e.g. "/" or "introduction".
    Page(String),
    /// Nested group with its own ordered children.
    Group {
        title: String,
        children: Vec<SidebarEntry>,
    },
}

impl ThemeSectionConfig {
    /// Repository to use for edit links.
    pub fn edit_repo(&self) -> Option<&str> {
        self.docs_repo.as_deref().or(self.repo.as_deref())
    }

    /// Validate that every sidebar path and nav target resolves.
    ///
    /// Sidebar paths and internal nav links must map to a discoverable
    /// content source; other nav links must be well-formed http(s) URLs.
    /// A missing page is a configuration error, not a silent broken link.
    pub fn validate(&self, pages: &PageStore, diag: &mut ConfigDiagnostics) {
        let sidebar_field = FieldPath::new("theme.sidebar");
        for (i, entry) in self.sidebar.iter().enumerate() {
            validate_sidebar_entry(entry, &sidebar_field.index(i), pages, diag);
        }

        for (i, item) in self.nav.iter().enumerate() {
            validate_nav_link(item, &FieldPath::new("theme.nav").index(i), pages, diag);
        }
    }
}

fn validate_sidebar_entry(
    entry: &SidebarEntry,
    field: &FieldPath,
    pages: &PageStore,
    diag: &mut ConfigDiagnostics,
) {
    match entry {
        SidebarEntry::Page(path) => {
            if !pages.contains(path) {
                diag.error_with_hint(
                    DiagnosticKind::BrokenPageReference,
                    field.clone(),
                    format!("sidebar path '{path}' has no content source"),
                    format!("expected {}", PageStore::describe_candidates(path)),
                );
            }
        }
        SidebarEntry::Group { children, .. } => {
            let children_field = field.child("children");
            for (i, child) in children.iter().enumerate() {
                validate_sidebar_entry(child, &children_field.index(i), pages, diag);
            }
        }
    }
}

fn validate_nav_link(
    item: &NavItem,
    field: &FieldPath,
    pages: &PageStore,
    diag: &mut ConfigDiagnostics,
) {
    let link = &item.link;

    if link.starts_with('/') {
        // Internal page path; fragments point into the page
        let target = link.split('#').next().unwrap_or(link);
        if !pages.contains(target) {
            diag.error(
                DiagnosticKind::BrokenPageReference,
                field.child("link"),
                format!("nav link '{link}' has no content source"),
            );
        }
        return;
    }

    match url::Url::parse(link) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => {
            diag.error(
                DiagnosticKind::BrokenPageReference,
                field.child("link"),
                format!(
                    "nav link scheme '{}' not supported, must be http or https",
                    parsed.scheme()
                ),
            );
        }
        Err(_) => {
            diag.error_with_hint(
                DiagnosticKind::BrokenPageReference,
                field.child("link"),
                format!("nav link '{link}' is neither an internal page nor a valid URL"),
                "internal links start with '/', external links with http(s)://",
            );
        }
    }
}
