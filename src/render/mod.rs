//! Markdown rendering pipeline.
//!
//! Thin wiring around pulldown-cmark, honoring `[markdown]` options:
//! heading anchors (with optional permalinks), fenced-code line numbers,
//! and the extension flags resolved through the [`ExtensionRegistry`].

mod extensions;

pub use extensions::ExtensionRegistry;

use crate::config::section::MarkdownSectionConfig;
use crate::utils::html::escape;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use rustc_hash::FxHashSet;

/// A rendered page body.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// HTML body content.
    pub html: String,
    /// Text of the first level-1 heading, if any.
    pub title: Option<String>,
}

/// Markdown to HTML renderer configured from `[markdown]`.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    line_numbers: bool,
    permalink: bool,
}

impl MarkdownRenderer {
    pub fn new(markdown: &MarkdownSectionConfig, registry: &ExtensionRegistry) -> Self {
        Self {
            options: registry.options_for(&markdown.extensions),
            line_numbers: markdown.line_numbers,
            permalink: markdown.anchor.permalink,
        }
    }

    /// Render one markdown source to HTML.
    pub fn render(&self, source: &str) -> RenderedPage {
        let events: Vec<Event<'_>> = Parser::new_ext(source, self.options).collect();

        let mut out = Vec::with_capacity(events.len());
        let mut title = None;
        let mut used_slugs = FxHashSet::default();

        let mut iter = events.into_iter();
        while let Some(event) = iter.next() {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    classes,
                    attrs,
                    ..
                }) => {
                    let inner = take_until(&mut iter, TagEnd::Heading(level));
                    let text = plain_text(&inner);
                    let slug = unique_slug(&text, &mut used_slugs);

                    if level == pulldown_cmark::HeadingLevel::H1 && title.is_none() {
                        title = Some(text);
                    }

                    out.push(Event::Start(Tag::Heading {
                        level,
                        id: Some(CowStr::from(slug.clone())),
                        classes,
                        attrs,
                    }));
                    if self.permalink {
                        out.push(Event::InlineHtml(CowStr::from(format!(
                            "<a class=\"header-anchor\" href=\"#{slug}\" aria-hidden=\"true\">#</a>"
                        ))));
                    }
                    out.extend(inner);
                    out.push(Event::End(TagEnd::Heading(level)));
                }
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) if self.line_numbers => {
                    let inner = take_until(&mut iter, TagEnd::CodeBlock);
                    let code = plain_text(&inner);
                    out.push(Event::Html(CowStr::from(render_code_block(&lang, &code))));
                }
                Event::InlineMath(math) => {
                    out.push(Event::InlineHtml(CowStr::from(format!(
                        "<span class=\"katex-inline\">{}</span>",
                        escape(&math)
                    ))));
                }
                Event::DisplayMath(math) => {
                    out.push(Event::InlineHtml(CowStr::from(format!(
                        "<span class=\"katex-display\">{}</span>",
                        escape(&math)
                    ))));
                }
                other => out.push(other),
            }
        }

        let mut body = String::new();
        html::push_html(&mut body, out.into_iter());

        RenderedPage { html: body, title }
    }
}

/// Drain events up to (excluding) the matching end tag.
fn take_until<'a>(
    iter: &mut impl Iterator<Item = Event<'a>>,
    end: TagEnd,
) -> Vec<Event<'a>> {
    let mut inner = Vec::new();
    for event in iter.by_ref() {
        if matches!(&event, Event::End(e) if *e == end) {
            break;
        }
        inner.push(event);
    }
    inner
}

/// Concatenated text content of a buffered event span.
fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Fenced code block with a line-number column.
fn render_code_block(lang: &str, code: &str) -> String {
    let lang = lang.split_whitespace().next().unwrap_or("");
    let lang_class = if lang.is_empty() {
        String::new()
    } else {
        format!("language-{lang}")
    };

    let line_count = code.lines().count().max(1);
    let mut numbers = String::new();
    for n in 1..=line_count {
        numbers.push_str(&format!("<span class=\"line-number\">{n}</span><br>"));
    }

    format!(
        "<div class=\"{lang_class} line-numbers-mode\">\
<pre><code class=\"{lang_class}\">{code}</code></pre>\
<div class=\"line-numbers-wrapper\">{numbers}</div>\
</div>\n",
        code = escape(code),
    )
}

/// Slugify heading text: lowercase, alphanumerics kept, runs of other
/// characters collapsed to single hyphens.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

fn unique_slug(text: &str, used: &mut FxHashSet<String>) -> String {
    let base = slugify(text);
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let mut slug = base.clone();
    let mut n = 1;
    while !used.insert(slug.clone()) {
        slug = format!("{base}-{n}");
        n += 1;
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::AnchorConfig;

    fn renderer(extensions: &[&str], line_numbers: bool, permalink: bool) -> MarkdownRenderer {
        let markdown = MarkdownSectionConfig {
            line_numbers,
            anchor: AnchorConfig { permalink },
            extensions: extensions.iter().map(|s| (*s).to_string()).collect(),
        };
        MarkdownRenderer::new(&markdown, &ExtensionRegistry::builtin())
    }

    #[test]
    fn test_basic_render() {
        let page = renderer(&[], false, false).render("# Hello\n\nSome *text*.");
        assert_eq!(page.title.as_deref(), Some("Hello"));
        assert!(page.html.contains("<em>text</em>"));
    }

    #[test]
    fn test_heading_gets_id() {
        let page = renderer(&[], false, false).render("## Spatial Data");
        assert!(page.html.contains("id=\"spatial-data\""));
    }

    #[test]
    fn test_permalink_anchor() {
        let page = renderer(&[], false, true).render("## Raster");
        assert!(page.html.contains("class=\"header-anchor\""));
        assert!(page.html.contains("href=\"#raster\""));
    }

    #[test]
    fn test_no_permalink_by_default() {
        let page = renderer(&[], false, false).render("## Raster");
        assert!(!page.html.contains("header-anchor"));
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let page = renderer(&[], false, false).render("## Setup\n\n## Setup");
        assert!(page.html.contains("id=\"setup\""));
        assert!(page.html.contains("id=\"setup-1\""));
    }

    #[test]
    fn test_katex_math() {
        let page = renderer(&["katex"], false, false).render("inline $x^2$ math");
        assert!(page.html.contains("katex-inline"));
        assert!(page.html.contains("x^2"));
    }

    #[test]
    fn test_math_disabled_without_extension() {
        let page = renderer(&[], false, false).render("inline $x^2$ math");
        assert!(!page.html.contains("katex-inline"));
    }

    #[test]
    fn test_line_numbers() {
        let page = renderer(&[], true, false).render("```r\nlibrary(sf)\nplot(x)\n```");
        assert!(page.html.contains("line-numbers-mode"));
        assert!(page.html.contains("language-r"));
        assert!(page.html.contains("<span class=\"line-number\">2</span>"));
        assert!(!page.html.contains("<span class=\"line-number\">3</span>"));
    }

    #[test]
    fn test_tables_extension() {
        let source = "|a|b|\n|-|-|\n|1|2|\n";
        let with = renderer(&["tables"], false, false).render(source);
        assert!(with.html.contains("<table>"));
        let without = renderer(&[], false, false).render(source);
        assert!(!without.html.contains("<table>"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Spatial Data Handling"), "spatial-data-handling");
        assert_eq!(slugify("  A -- B  "), "a-b");
        // Unicode headings keep their characters
        assert_eq!(slugify("地理空間データ"), "地理空間データ");
    }
}
