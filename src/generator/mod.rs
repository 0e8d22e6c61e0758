//! Static site generation.
//!
//! Consumes a validated [`SiteConfig`] and a scanned [`PageStore`]: renders
//! every markdown source through the [`MarkdownRenderer`], wraps it in the
//! page shell, and writes `<page>/index.html` files under the output
//! directory. Non-markdown files in the content directory are copied through
//! unchanged.
//!
//! Generation assumes validation already passed; callers validate first so
//! a broken configuration never produces partial output.

mod shell;

pub use shell::{PageShell, PageView};

use crate::config::SiteConfig;
use crate::content::PageStore;
use crate::nav::NavTree;
use crate::render::{ExtensionRegistry, MarkdownRenderer};
use crate::utils::date::DateUtc;
use crate::{debug, log};
use anyhow::{Context, Result};
use jwalk::WalkDir;
use std::fs;
use std::path::{Path, PathBuf};

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub assets: usize,
}

/// Build the whole site into the output directory.
pub fn build_site(config: &SiteConfig, pages: &PageStore) -> Result<BuildSummary> {
    let registry = ExtensionRegistry::builtin();
    let renderer = MarkdownRenderer::new(&config.markdown, &registry);
    let nav = NavTree::resolve(&config.theme);
    let shell = PageShell::new(config, &nav);

    let output = &config.build.output;
    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut page_count = 0;
    for (key, source) in pages.iter() {
        render_page(config, &renderer, &shell, key, source)?;
        page_count += 1;
    }

    let assets = copy_assets(&config.build.content, output)?;

    log!(
        "build";
        "{} page(s), {} asset(s) -> {}",
        page_count,
        assets,
        output.display()
    );

    Ok(BuildSummary {
        pages: page_count,
        assets,
    })
}

/// Render one page source and write its HTML file.
fn render_page(
    config: &SiteConfig,
    renderer: &MarkdownRenderer,
    shell: &PageShell<'_>,
    key: &str,
    source: &Path,
) -> Result<()> {
    let markdown = fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let rendered = renderer.render(&markdown);

    let source_rel = source
        .strip_prefix(&config.build.content)
        .unwrap_or(source)
        .to_string_lossy()
        .replace('\\', "/");

    let last_updated = if config.theme.last_updated {
        source_mtime(source)
    } else {
        None
    };

    let html = shell.render(&PageView {
        path: key,
        title: rendered.title.as_deref(),
        body: &rendered.html,
        source_rel: &source_rel,
        last_updated,
    });

    let target = page_output_path(&config.build.output, key);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, html)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    debug!("build"; "{} -> {}", source_rel, target.display());
    Ok(())
}

/// Last-modified date of a source file, when the filesystem reports one.
fn source_mtime(source: &Path) -> Option<String> {
    let mtime = fs::metadata(source).and_then(|m| m.modified()).ok()?;
    Some(DateUtc::from_system_time(mtime)?.to_iso_date())
}

/// Output file for a page key: the root page lands at `index.html`, every
/// other page at `<key>/index.html` for clean URLs.
fn page_output_path(output: &Path, key: &str) -> PathBuf {
    if key == "index" {
        output.join("index.html")
    } else {
        output.join(key).join("index.html")
    }
}

/// Copy non-markdown content files through, preserving relative paths.
fn copy_assets(content: &Path, output: &Path) -> Result<usize> {
    let mut count = 0;

    for entry in WalkDir::new(content)
        .skip_hidden(true)
        .sort(true)
        .into_iter()
        .flatten()
    {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) == Some("md")
        {
            continue;
        }

        let Ok(rel) = path.strip_prefix(content) else {
            continue;
        };
        let target = output.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(&path, &target)
            .with_context(|| format!("Failed to copy {}", path.display()))?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn site(extra: &str) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(extra);
        config.build.content = dir.path().join("content");
        config.build.output = dir.path().join("dist");
        fs::create_dir_all(&config.build.content).unwrap();
        (dir, config)
    }

    #[test]
    fn test_build_writes_clean_urls() {
        let (_dir, config) = site("");
        write(&config.build.content, "index.md", "# Home");
        write(&config.build.content, "raster.md", "# Raster");

        let pages = PageStore::scan(&config.build.content);
        let summary = build_site(&config, &pages).unwrap();

        assert_eq!(summary.pages, 2);
        assert!(config.build.output.join("index.html").exists());
        assert!(config.build.output.join("raster/index.html").exists());
    }

    #[test]
    fn test_page_body_and_chrome_present() {
        let (_dir, config) = site("[theme]\nsidebar = [\"/\"]");
        write(&config.build.content, "index.md", "# いろは\n\n本文です。");

        let pages = PageStore::scan(&config.build.content);
        build_site(&config, &pages).unwrap();

        let html = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(html.contains("<html lang=\"ja\">"));
        assert!(html.contains("本文です。"));
        assert!(html.contains("<title>いろは | テストサイト</title>"));
        assert!(html.contains("sidebar-link active"));
    }

    #[test]
    fn test_assets_copied_through() {
        let (_dir, config) = site("");
        write(&config.build.content, "index.md", "# Home");
        write(&config.build.content, "images/map.svg", "<svg></svg>");

        let pages = PageStore::scan(&config.build.content);
        let summary = build_site(&config, &pages).unwrap();

        assert_eq!(summary.assets, 1);
        assert!(config.build.output.join("images/map.svg").exists());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let (_dir, mut config) = site("");
        write(&config.build.content, "index.md", "# Home");
        write(&config.build.output, "stale.html", "old");

        config.build.clean = true;
        let pages = PageStore::scan(&config.build.content);
        build_site(&config, &pages).unwrap();

        assert!(!config.build.output.join("stale.html").exists());
        assert!(config.build.output.join("index.html").exists());
    }

    #[test]
    fn test_last_updated_rendered_when_enabled() {
        let (_dir, config) = site("[theme]\nlast_updated = true");
        write(&config.build.content, "index.md", "# Home");

        let pages = PageStore::scan(&config.build.content);
        build_site(&config, &pages).unwrap();

        let html = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert!(html.contains("last-updated"));
    }

    #[test]
    fn test_page_output_path() {
        let out = Path::new("/tmp/dist");
        assert_eq!(
            page_output_path(out, "index"),
            PathBuf::from("/tmp/dist/index.html")
        );
        assert_eq!(
            page_output_path(out, "guide/advanced"),
            PathBuf::from("/tmp/dist/guide/advanced/index.html")
        );
    }
}
