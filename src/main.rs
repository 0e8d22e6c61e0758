//! Shiori - a static documentation site generator.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod nav;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use content::PageStore;
use render::ExtensionRegistry;

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Init { .. } => cli::init_site(&config),
        Commands::Build { .. } => {
            let pages = resolve_and_validate(&config)?;
            generator::build_site(&config, &pages)?;
            Ok(())
        }
        Commands::Serve { .. } => {
            let pages = resolve_and_validate(&config)?;
            generator::build_site(&config, &pages)?;
            cli::serve(&config)
        }
        Commands::Check { .. } => {
            let pages = resolve_and_validate(&config)?;
            log!("check"; "configuration ok, {} page(s) resolved", pages.len());
            Ok(())
        }
    }
}

/// Scan content and run the full batch validation.
///
/// Nothing is written until this succeeds, so a broken configuration never
/// produces partial output.
fn resolve_and_validate(config: &SiteConfig) -> Result<PageStore> {
    let pages = PageStore::scan(&config.build.content);
    config.validate(&pages, &ExtensionRegistry::builtin())?;
    Ok(pages)
}
