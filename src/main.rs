use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Component, Path, PathBuf};

use jscov_cobertura::config::{Config, CONFIG_FILE};
use jscov_cobertura::coverage::print_summary;

#[derive(Parser)]
#[command(name = "jscov-cobertura")]
#[command(about = "Transforms jscoverage's JSON into Cobertura's XML format")]
#[command(version)]
struct Cli {
    /// JSCoverage JSON to read (default: target/coverage/jscoverage.json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cobertura XML to write (default: target/coverage/cobertura-coverage.xml)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory relative paths are resolved against
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Path to config file (default: jscov-cobertura.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_dir) = load_config(cli.config.as_deref())?;

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => match config_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Could not determine current directory")?,
        },
    };

    let input = resolve(&base_dir, cli.input.unwrap_or(config.paths.input));
    let output = resolve(&base_dir, cli.output.unwrap_or(config.paths.output));

    if same_file(&input, &output) {
        anyhow::bail!("Input and output both point to {}", input.display());
    }

    cmd_transform(&input, &output, cli.quiet)
}

/// An explicitly given config must exist; the default one is optional
fn load_config(path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };

    if !required && !path.exists() {
        return Ok((Config::default(), None));
    }

    let path = std::fs::canonicalize(&path)
        .with_context(|| format!("Could not find config file: {}", path.display()))?;
    let config = Config::load(&path)
        .with_context(|| format!("Could not load {}", path.display()))?;
    let dir = path.parent().map(|p| p.to_path_buf());

    Ok((config, dir))
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Compare two paths after resolving `.`, `..` and symlinks, so different
/// spellings of one file are caught even when the output does not exist yet
fn same_file(a: &Path, b: &Path) -> bool {
    normalize_path(a) == normalize_path(b)
}

fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_relative() {
        std::env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    };

    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    // Canonicalize the deepest existing ancestor and re-append the rest
    let mut existing = lexical.as_path();
    let mut rest = Vec::new();
    while !existing.as_os_str().is_empty() {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return rest.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    lexical
}

fn cmd_transform(input: &Path, output: &Path, quiet: bool) -> Result<()> {
    if !quiet {
        println!(
            "\n{} Transforming jscoverage output to Cobertura's XML format...",
            "🔄".cyan()
        );
        println!("  {} {}", "Reading input from".dimmed(), input.display());
    }

    let report = jscov_cobertura::convert_file(input, output)
        .with_context(|| format!("Could not transform {}", input.display()))?;

    if !quiet {
        println!(
            "  {} {}",
            "Output written to".dimmed(),
            output.display().to_string().green()
        );
        println!();
        print_summary(&report);
    }

    Ok(())
}
