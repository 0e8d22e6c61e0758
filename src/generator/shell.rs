//! Per-page HTML shell.
//!
//! Wraps rendered page bodies in consistent chrome: head tags from `[site]`,
//! a navigation bar from `[theme]` nav items, the sidebar reading order from
//! the resolved [`NavTree`], and a footer with the optional edit link and
//! last-updated stamp.

use crate::config::SiteConfig;
use crate::config::section::LocaleConfig;
use crate::nav::{NavNode, NavTree};
use crate::utils::html::{escape, escape_attr};

/// Branch used in repository edit links.
const EDIT_BRANCH: &str = "master";

/// Everything shell rendering needs for one page.
pub struct PageView<'a> {
    /// Normalized page key ("index", "raster", "guide/advanced").
    pub path: &'a str,
    /// First H1 of the page, if any.
    pub title: Option<&'a str>,
    /// Rendered HTML body.
    pub body: &'a str,
    /// Source path relative to the content dir, for edit links.
    pub source_rel: &'a str,
    /// Last modification date ("YYYY-MM-DD"), when enabled.
    pub last_updated: Option<String>,
}

/// HTML shell renderer, shared across all pages of one build.
pub struct PageShell<'a> {
    config: &'a SiteConfig,
    nav: &'a NavTree,
}

impl<'a> PageShell<'a> {
    pub fn new(config: &'a SiteConfig, nav: &'a NavTree) -> Self {
        Self { config, nav }
    }

    /// Render the full HTML document for one page.
    pub fn render(&self, page: &PageView<'_>) -> String {
        let locale = self.config.site.root_locale();
        let lang = locale.map_or("en", |l| l.lang.as_str());

        let mut out = String::with_capacity(page.body.len() + 4096);
        out.push_str("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"{}\">\n", escape_attr(lang)));
        self.render_head(&mut out, page, locale);
        out.push_str("<body>\n");
        self.render_navbar(&mut out);
        out.push_str("<div class=\"page-container\">\n");
        self.render_sidebar(&mut out, page.path);
        out.push_str("<main class=\"page\">\n");
        out.push_str(page.body);
        self.render_footer(&mut out, page);
        out.push_str("</main>\n</div>\n</body>\n</html>\n");
        out
    }

    fn render_head(&self, out: &mut String, page: &PageView<'_>, locale: Option<&LocaleConfig>) {
        let site = &self.config.site;
        out.push_str("<head>\n");

        // Charset first unless the config declares one itself
        let has_charset = site.meta.iter().any(|m| m.contains_key("charset"));
        if !has_charset {
            out.push_str("<meta charset=\"utf-8\">\n");
        }

        for attrs in &site.meta {
            out.push_str("<meta");
            for (name, value) in attrs {
                out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
            }
            out.push_str(">\n");
        }

        let site_title = locale.map_or("", |l| l.title.as_str());
        let title = match page.title {
            Some(t) if !site_title.is_empty() => format!("{t} | {site_title}"),
            Some(t) => t.to_string(),
            None => site_title.to_string(),
        };
        out.push_str(&format!("<title>{}</title>\n", escape(&title)));

        if let Some(locale) = locale
            && !locale.description.is_empty()
        {
            out.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">\n",
                escape_attr(&locale.description)
            ));
        }

        // Raw head tags, in declared order
        for tag in &site.head {
            out.push_str(&format!("<{}", tag.tag));
            for (name, value) in &tag.attrs {
                out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
            }
            if tag.tag == "script" {
                out.push_str("></script>\n");
            } else {
                out.push_str(">\n");
            }
        }

        out.push_str("</head>\n");
    }

    fn render_navbar(&self, out: &mut String) {
        let theme = &self.config.theme;
        out.push_str("<header class=\"navbar\">\n<nav>\n");

        for item in &theme.nav {
            let href = if item.link.starts_with('/') {
                self.page_href(item.link.trim_matches('/'))
            } else {
                item.link.clone()
            };
            out.push_str(&format!(
                "<a class=\"nav-link\" href=\"{}\">{}</a>\n",
                escape_attr(&href),
                escape(&item.text)
            ));
        }

        if let Some(repo) = &theme.repo {
            out.push_str(&format!(
                "<a class=\"nav-link repo-link\" href=\"{}\">{}</a>\n",
                escape_attr(&repo_url(repo)),
                escape(&theme.repo_label)
            ));
        }

        out.push_str("</nav>\n</header>\n");
    }

    fn render_sidebar(&self, out: &mut String, active: &str) {
        if self.nav.is_empty() {
            return;
        }
        out.push_str("<aside class=\"sidebar\">\n<ul>\n");
        for node in &self.nav.roots {
            self.render_sidebar_node(out, node, active);
        }
        out.push_str("</ul>\n</aside>\n");
    }

    fn render_sidebar_node(&self, out: &mut String, node: &NavNode, active: &str) {
        match node {
            NavNode::Leaf { path } => {
                let key = normalize_key(path);
                let class = if key == active {
                    "sidebar-link active"
                } else {
                    "sidebar-link"
                };
                out.push_str(&format!(
                    "<li><a class=\"{}\" href=\"{}\">{}</a></li>\n",
                    class,
                    escape_attr(&self.page_href(&key)),
                    escape(path)
                ));
            }
            NavNode::Group { title, children } => {
                out.push_str(&format!(
                    "<li class=\"sidebar-group\"><p class=\"sidebar-heading\">{}</p>\n<ul>\n",
                    escape(title)
                ));
                for child in children {
                    self.render_sidebar_node(out, child, active);
                }
                out.push_str("</ul>\n</li>\n");
            }
        }
    }

    fn render_footer(&self, out: &mut String, page: &PageView<'_>) {
        let theme = &self.config.theme;
        let edit = self.edit_url(page.source_rel);
        if edit.is_none() && page.last_updated.is_none() {
            return;
        }

        out.push_str("<footer class=\"page-edit\">\n");
        if let Some(url) = edit {
            out.push_str(&format!(
                "<a class=\"edit-link\" href=\"{}\" rel=\"noopener noreferrer\">{}</a>\n",
                escape_attr(&url),
                escape(&theme.edit_link_text)
            ));
        }
        if let Some(date) = &page.last_updated {
            out.push_str(&format!(
                "<span class=\"last-updated\">{}</span>\n",
                escape(date)
            ));
        }
        out.push_str("</footer>\n");
    }

    /// Edit URL for a page source, when edit links are enabled.
    fn edit_url(&self, source_rel: &str) -> Option<String> {
        let theme = &self.config.theme;
        if !theme.edit_links {
            return None;
        }
        let repo = theme.edit_repo()?;
        let dir = theme.docs_dir.trim_matches('/');
        let path = if dir.is_empty() {
            source_rel.to_string()
        } else {
            format!("{dir}/{source_rel}")
        };
        Some(format!(
            "{}/edit/{EDIT_BRANCH}/{path}",
            repo_url(repo).trim_end_matches('/')
        ))
    }

    /// Base-prefixed href for a page key.
    fn page_href(&self, key: &str) -> String {
        let base = &self.config.site.base;
        if key.is_empty() || key == "index" {
            base.clone()
        } else {
            format!("{base}{key}/")
        }
    }
}

/// Full URL for a repo setting (`owner/name` shorthand or explicit URL).
fn repo_url(repo: &str) -> String {
    if repo.starts_with("http://") || repo.starts_with("https://") {
        repo.to_string()
    } else {
        format!("https://github.com/{}", repo.trim_matches('/'))
    }
}

fn normalize_key(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "index".to_string()
    } else {
        trimmed.to_string()
    }
}
