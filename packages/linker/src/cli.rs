//! Command-line interface for the linker.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::catalog::CitationCatalog;
use crate::config::{catalog_path_from_env, LinkerConfig};
use crate::error::Result;
use crate::render::{render_segments, OutputFormat};

/// ImportWatch citation linker - Turn regulatory citation codes in prose into links.
#[derive(Parser)]
#[command(name = "importwatch-linker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Link citation codes in text and print the result.
    Link {
        /// File to read (default: stdin)
        file: Option<PathBuf>,

        /// Text to link instead of reading a file
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// YAML citation catalog (default: $IMPORTWATCH_CATALOG or built-in)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Output format: plain, html, markdown, json or yaml
        #[arg(short, long, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Prefix for citation links (default: /violation/)
        #[arg(long)]
        href_prefix: Option<String>,
    },

    /// Validate a citation catalog and list its codes.
    Catalog {
        /// YAML citation catalog (default: $IMPORTWATCH_CATALOG or built-in)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute already parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Link {
            file,
            text,
            catalog,
            format,
            href_prefix,
        } => {
            let config = resolve_config(catalog, href_prefix)?;
            let input = read_input(text, file.as_deref())?;
            link_command(&config, &input, format)
        }
        Commands::Catalog { catalog } => {
            // Listing never builds links, so the href prefix is not read.
            let config = LinkerConfig {
                catalog_path: catalog.or_else(catalog_path_from_env),
                ..LinkerConfig::new()
            };
            catalog_command(&config)
        }
    }
}

/// Merge environment configuration with command-line overrides.
fn resolve_config(catalog: Option<PathBuf>, href_prefix: Option<String>) -> Result<LinkerConfig> {
    let mut config = LinkerConfig::from_env()?;
    if let Some(path) = catalog {
        config = config.with_catalog_path(path);
    }
    if let Some(prefix) = href_prefix {
        config = config.with_href_prefix(prefix)?;
    }
    Ok(config)
}

fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Execute the link command.
fn link_command(config: &LinkerConfig, input: &str, format: OutputFormat) -> Result<()> {
    let catalog = CitationCatalog::load(config)?;
    let segments = catalog.linker().link(input);
    let rendered = render_segments(&segments, format, &config.href_prefix)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }

    if console::user_attended_stderr() {
        let citations = segments.iter().filter(|s| s.is_citation()).count();
        eprintln!(
            "{} {} citation(s) using {} code(s)",
            style("Linked").green().bold(),
            style(citations).cyan(),
            catalog.len()
        );
    }

    Ok(())
}

/// Execute the catalog command.
fn catalog_command(config: &LinkerConfig) -> Result<()> {
    let catalog = CitationCatalog::load(config)?;

    let source = config
        .catalog_path
        .as_ref()
        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());
    println!("{} {}", style("Catalog:").bold(), source);
    println!();

    for entry in catalog.codes() {
        match &entry.title {
            Some(title) => println!(
                "  {:<12} {} ({})",
                style(&entry.identifier).cyan(),
                entry.code,
                title
            ),
            None => println!("  {:<12} {}", style(&entry.identifier).cyan(), entry.code),
        }
    }

    println!();
    println!(
        "{} {} code(s)",
        style("Valid:").green().bold(),
        catalog.len()
    );

    Ok(())
}
