//! Configuration section definitions.
//!
//! Each module corresponds to a section in `shiori.toml`:
//!
//! | Module     | TOML Section   | Purpose                                |
//! |------------|----------------|----------------------------------------|
//! | `build`    | `[build]`      | Content and output paths               |
//! | `markdown` | `[markdown]`   | Markdown rendering options             |
//! | `serve`    | `[serve]`      | Development server                     |
//! | `site`     | `[site]`       | Base path, locales, head and meta tags |
//! | `theme`    | `[theme]`      | Navigation, sidebar, repo links        |

pub mod build;
mod markdown;
mod serve;
pub mod site;
pub mod theme;

// Re-export section configs
pub use build::BuildSectionConfig;
pub use markdown::{AnchorConfig, MarkdownSectionConfig};
pub use serve::ServeConfig;
pub use site::{LocaleConfig, SiteSectionConfig};
pub use theme::{SidebarEntry, ThemeSectionConfig};
