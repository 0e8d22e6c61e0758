//! Content source discovery.
//!
//! Maps page paths as they appear in configuration ("/", "introduction",
//! "guide/raster") to markdown source files under the content directory.
//! The store is built eagerly before validation so the resolver can check
//! references without touching the filesystem again.

use jwalk::WalkDir;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Markdown file extension recognized as a page source.
const PAGE_EXT: &str = "md";

/// Discovered content pages, keyed by normalized page path.
///
/// Normalization: `"/"` and `""` mean the root page (`index`); leading and
/// trailing slashes and `#fragment` suffixes are ignored. A page `foo` may
/// live at `foo.md` or `foo/index.md`; the root page at `index.md` or
/// `README.md`.
#[derive(Debug, Default, Clone)]
pub struct PageStore {
    pages: FxHashMap<String, PathBuf>,
}

impl PageStore {
    /// Scan a content directory for markdown sources.
    pub fn scan(content_dir: &Path) -> Self {
        let mut pages = FxHashMap::default();

        for entry in WalkDir::new(content_dir)
            .skip_hidden(true)
            .sort(true)
            .into_iter()
            .flatten()
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(PAGE_EXT)
            {
                continue;
            }

            let Ok(rel) = path.strip_prefix(content_dir) else {
                continue;
            };
            let is_index = rel.file_stem().and_then(|s| s.to_str()) == Some("index");
            let key = page_key(rel);

            // index.md shadows README.md in the same directory
            if is_index {
                pages.insert(key, path);
            } else {
                pages.entry(key).or_insert(path);
            }
        }

        Self { pages }
    }

    /// Build a store from explicit page keys (filesystem-free, for tests
    /// and dry resolution).
    pub fn from_pages(keys: impl IntoIterator<Item = String>) -> Self {
        let pages = keys
            .into_iter()
            .map(|key| {
                let path = PathBuf::from(format!("{key}.{PAGE_EXT}"));
                (key, path)
            })
            .collect();
        Self { pages }
    }

    /// Whether a page path resolves to a content source.
    pub fn contains(&self, page: &str) -> bool {
        self.pages.contains_key(&normalize(page))
    }

    /// Source file for a page path.
    pub fn source(&self, page: &str) -> Option<&Path> {
        self.pages.get(&normalize(page)).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// All pages in deterministic (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        let mut entries: Vec<_> = self
            .pages
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_path()))
            .collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries.into_iter()
    }

    /// Human-readable list of source candidates for a page path,
    /// used in diagnostics.
    pub fn describe_candidates(page: &str) -> String {
        let key = normalize(page);
        if key == "index" {
            format!("index.{PAGE_EXT} or README.{PAGE_EXT}")
        } else {
            format!("{key}.{PAGE_EXT} or {key}/index.{PAGE_EXT}")
        }
    }
}

/// Normalize a page path from config to a store key.
fn normalize(page: &str) -> String {
    let page = page.split('#').next().unwrap_or(page);
    let trimmed = page.trim_matches('/');
    if trimmed.is_empty() {
        "index".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Store key for a source file path relative to the content dir.
fn page_key(rel: &Path) -> String {
    let stem = rel
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let parent = rel
        .parent()
        .and_then(|p| p.to_str())
        .unwrap_or_default()
        .replace('\\', "/");

    // index.md / README.md name their directory
    let names_dir = stem == "index" || stem == "README";

    match (parent.is_empty(), names_dir) {
        (true, true) => "index".to_string(),
        (true, false) => stem.to_string(),
        (false, true) => parent,
        (false, false) => format!("{parent}/{stem}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_flat_pages() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.md", "# Home");
        write(&dir, "introduction.md", "# Intro");

        let pages = PageStore::scan(dir.path());
        assert_eq!(pages.len(), 2);
        assert!(pages.contains("/"));
        assert!(pages.contains("introduction"));
        assert!(pages.contains("/introduction"));
        assert!(!pages.contains("missing"));
    }

    #[test]
    fn test_readme_names_root() {
        let dir = TempDir::new().unwrap();
        write(&dir, "README.md", "# Home");

        let pages = PageStore::scan(dir.path());
        assert!(pages.contains("/"));
    }

    #[test]
    fn test_directory_index_names_directory() {
        let dir = TempDir::new().unwrap();
        write(&dir, "raster/index.md", "# Raster");
        write(&dir, "guide/advanced.md", "# Advanced");

        let pages = PageStore::scan(dir.path());
        assert!(pages.contains("raster"));
        assert!(pages.contains("raster/"));
        assert!(pages.contains("guide/advanced"));
    }

    #[test]
    fn test_non_markdown_ignored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "image.png", "binary");
        write(&dir, "notes.txt", "text");

        let pages = PageStore::scan(dir.path());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_fragment_ignored_in_lookup() {
        let pages = PageStore::from_pages(["introduction".to_string()]);
        assert!(pages.contains("/introduction#setup"));
    }

    #[test]
    fn test_iter_is_sorted() {
        let pages =
            PageStore::from_pages(["zeta".to_string(), "alpha".to_string(), "index".to_string()]);
        let keys: Vec<_> = pages.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "index", "zeta"]);
    }

    #[test]
    fn test_describe_candidates() {
        assert_eq!(
            PageStore::describe_candidates("/"),
            "index.md or README.md"
        );
        assert_eq!(
            PageStore::describe_candidates("introduction"),
            "introduction.md or introduction/index.md"
        );
    }
}
