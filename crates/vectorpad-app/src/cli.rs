//! Command line interface.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vectorpad_core::{Canvas, FileStorage, Storage};

#[derive(Debug, Parser)]
#[command(name = "vectorpad", version, about = "Inspect, normalize and export VectorPad drawings")]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a drawing and print a summary of its contents
    Check { file: PathBuf },
    /// Rewrite a drawing in canonical form
    Fmt {
        file: PathBuf,
        /// Output file (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a drawing as XML
    Export {
        file: PathBuf,
        /// Output file (defaults to the input with an `.xml` extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run a command. Returns the text to print on success.
pub fn run(command: &Command, config: &AppConfig) -> AppResult<String> {
    let storage = FileStorage::working_dir();
    match command {
        Command::Check { file } => check(&storage, file),
        Command::Fmt { file, output } => {
            format_file(&storage, config, file, output.as_deref().unwrap_or(file.as_path()))
        }
        Command::Export { file, output } => {
            let output = output.clone().unwrap_or_else(|| file.with_extension("xml"));
            export(&storage, file, &output)
        }
    }
}

fn check(storage: &FileStorage, file: &Path) -> AppResult<String> {
    let document = storage.load(key(file)?)?;
    let stats = document.stats();
    Ok(format!(
        "{}: {} top-level shapes, {} lines, {} rectangles, {} groups, max depth {}",
        file.display(),
        stats.top_level,
        stats.lines,
        stats.rectangles,
        stats.groups,
        stats.max_depth
    ))
}

fn format_file(storage: &FileStorage, config: &AppConfig, file: &Path, output: &Path) -> AppResult<String> {
    let mut canvas = Canvas::with_config(&config.editor);
    canvas.load_from(storage, key(file)?)?;
    canvas.save_to(storage, key(output)?)?;
    Ok(format!("Formatted {} -> {}", file.display(), output.display()))
}

fn export(storage: &FileStorage, file: &Path, output: &Path) -> AppResult<String> {
    let document = storage.load(key(file)?)?;
    storage.export_xml(key(output)?, &document)?;
    Ok(format!("Exported {} -> {}", file.display(), output.display()))
}

fn key(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::InvalidPath(path.to_path_buf()))
}
