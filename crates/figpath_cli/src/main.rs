//! Figpath CLI
//!
//! Convert SVG path data to the absolute M/L/C/Z dialect and validate JSON
//! design documents before import.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use figpath_core::PathConverter;
use figpath_document::{DocumentConverter, Linter};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::FigpathConfig;

#[derive(Parser)]
#[command(name = "figpath")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SVG path conversion for design-tool JSON", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./figpath.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single path data string
    Convert {
        /// Path data, e.g. "M 10 10 a 5 5 0 0 1 10 0"
        path_data: String,
    },

    /// Convert every path in a JSON document
    File {
        /// Input JSON document
        input: PathBuf,

        /// Output path (defaults to <input>_converted.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check JSON documents for unsupported path commands and layout settings
    Validate {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = FigpathConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Convert { path_data } => cmd_convert(&config, &path_data),
        Commands::File { input, output } => cmd_file(&config, &input, output.as_deref()),
        Commands::Validate { files } => cmd_validate(&config, &files),
    }
}

fn cmd_convert(config: &FigpathConfig, path_data: &str) -> Result<()> {
    let converter = PathConverter::with_options(config.format_options());
    debug!(precision = ?converter.options().precision, "converting path data");
    let converted = converter
        .convert(path_data)
        .context("Failed to convert path data")?;

    println!("Original:  {}", path_data);
    println!("Converted: {}", converted);
    Ok(())
}

/// `icon.json` becomes `icon_converted.json` in the same directory
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_converted.json", stem))
}

fn read_document(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn cmd_file(config: &FigpathConfig, input: &Path, output: Option<&Path>) -> Result<()> {
    let mut document = read_document(input)?;

    let converter = DocumentConverter::new(
        PathConverter::with_options(config.format_options()),
        config.document.clone(),
    );
    debug!(
        workers = converter.options().workers,
        on_error = ?converter.options().on_error,
        "converting {}",
        input.display()
    );
    let report = converter
        .convert(&mut document)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    for change in &report.changes {
        info!("Converted {}", change.pointer);
        debug!("  before: {}", change.before);
        debug!("  after:  {}", change.after);
    }
    for skipped in &report.skipped {
        warn!("Left {} unchanged: {}", skipped.pointer, skipped.error);
    }

    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(&output, json + "\n")
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Converted {} of {} paths, saved to {}",
        report.changes.len(),
        report.paths,
        output.display()
    );
    Ok(())
}

fn cmd_validate(config: &FigpathConfig, files: &[PathBuf]) -> Result<()> {
    let linter = Linter::new(config.lint.clone(), config.document.clone());
    let mut all_valid = true;

    for path in files {
        let document = match read_document(path) {
            Ok(document) => document,
            Err(err) => {
                error!("{:#}", err);
                all_valid = false;
                continue;
            }
        };

        let report = linter.lint(&document);
        println!("{}", path.display());
        if report.issues.is_empty() {
            println!("  no issues found");
        }
        for issue in &report.issues {
            println!("{}", issue);
        }
        println!(
            "  {} error(s), {} warning(s)",
            report.errors().count(),
            report.warnings().count()
        );

        if !report.is_valid() {
            all_valid = false;
        }
    }

    if !all_valid {
        anyhow::bail!("Some files have errors; fix them before importing");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("designs/login.json")),
            PathBuf::from("designs/login_converted.json")
        );
        assert_eq!(
            default_output_path(Path::new("icon")),
            PathBuf::from("icon_converted.json")
        );
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["figpath", "-v", "file", "in.json", "-o", "out.json"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::File { input, output } => {
                assert_eq!(input, PathBuf::from("in.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected file command"),
        }
    }

    #[test]
    fn test_convert_takes_path_data() {
        let cli = Cli::try_parse_from(["figpath", "convert", "M 0 0 L 1 1"]).unwrap();
        assert!(matches!(cli.command, Commands::Convert { .. }));
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["figpath", "validate"]).is_err());
    }
}
