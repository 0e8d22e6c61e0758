//! Starter project scaffolding.

use crate::{config::SiteConfig, log};
use anyhow::{Result, bail};
use std::fs;

/// Starter configuration written by `shiori init`.
const STARTER_CONFIG: &str = r#"[site]
base = "/"

[site.locales."/"]
lang = "en"
title = "My Documentation"
description = "Documentation built with shiori"

[theme]
sidebar = ["/"]

[[theme.nav]]
text = "Home"
link = "/"

[markdown]
line_numbers = true
anchor = { permalink = true }
extensions = ["tables", "footnotes"]
"#;

/// Starter root page.
const STARTER_PAGE: &str = "# My Documentation\n\nWelcome. Edit `content/index.md` to get started.\n";

/// Create a new site skeleton at the project root.
pub fn init_site(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();

    if config.config_path.exists() {
        bail!(
            "'{}' already exists, refusing to overwrite",
            config.config_path.display()
        );
    }

    fs::create_dir_all(root.join("content"))?;
    fs::write(&config.config_path, STARTER_CONFIG)?;
    fs::write(root.join("content/index.md"), STARTER_PAGE)?;

    log!("init"; "created new site at {}", root.display());
    log!("init"; "next: cd into the project and run 'shiori serve'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_at(root: &std::path::Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = root.to_path_buf();
        config.config_path = root.join("shiori.toml");
        config
    }

    #[test]
    fn test_init_creates_skeleton() {
        let dir = TempDir::new().unwrap();
        let config = config_at(dir.path());

        init_site(&config).unwrap();

        assert!(dir.path().join("shiori.toml").exists());
        assert!(dir.path().join("content/index.md").exists());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let config = config_at(dir.path());
        fs::write(&config.config_path, "existing").unwrap();

        assert!(init_site(&config).is_err());
        assert_eq!(fs::read_to_string(&config.config_path).unwrap(), "existing");
    }

    #[test]
    fn test_starter_config_parses_cleanly() {
        let config = SiteConfig::from_str(STARTER_CONFIG).unwrap();
        assert!(config.site.locales.contains_key("/"));
        assert_eq!(config.theme.sidebar.len(), 1);
        assert!(config.markdown.line_numbers);
    }
}
