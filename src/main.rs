//! Markpad - A terminal markdown editor with a live rendered preview.
//!
//! # Usage
//!
//! ```bash
//! markpad
//! markpad --editor-width 60 --no-preview
//! markpad --print-html > notes.html
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use markpad::app::App;
use markpad::config::{
    ConfigFlags, ThemeMode, clear_config_flags, default_storage_dir, global_config_path,
    load_config_flags, local_override_path, parse_flag_tokens, save_config_flags,
};
use markpad::document::render_html;
use markpad::highlight::{HighlightBackground, set_background_mode};
use markpad::layout::DEFAULT_EDITOR_WIDTH;
use markpad::storage::{FileStorage, MemoryStorage, Storage, load_initial_document};

/// A terminal markdown editor with a live rendered preview
#[derive(Parser, Debug)]
#[command(name = "markpad", version, about, long_about = None)]
struct Cli {
    /// Directory the working document is persisted in
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Initial editor pane width in percent (20-80)
    #[arg(long, value_name = "PERCENT")]
    editor_width: Option<u16>,

    /// Start with the preview pane hidden
    #[arg(long)]
    no_preview: bool,

    /// Keep the document in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Print the stored document as HTML and exit
    #[arg(long)]
    print_html: bool,

    /// Force syntax highlight theme background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn effective_flags(cli: &Cli, raw_args: &[String]) -> Result<ConfigFlags> {
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    Ok(file_flags.union(&cli_flags))
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let effective = effective_flags(&cli, &raw_args)?;

    init_logging(effective.log_file.as_deref())?;

    match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => set_background_mode(None),
        ThemeMode::Light => set_background_mode(Some(HighlightBackground::Light)),
        ThemeMode::Dark => set_background_mode(Some(HighlightBackground::Dark)),
    }

    let storage: Box<dyn Storage> = if cli.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        let dir = effective
            .storage_dir
            .clone()
            .unwrap_or_else(default_storage_dir);
        Box::new(FileStorage::new(dir))
    };

    if cli.print_html {
        let initial = load_initial_document(storage.as_ref());
        if let Some(err) = initial.warning {
            tracing::warn!(error = %err, "falling back to the welcome document");
        }
        print!("{}", render_html(&initial.text));
        return Ok(());
    }

    let global_path = global_config_path();
    let local_path = local_override_path();
    let export_dir = effective
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let mut app = App::new(storage)
        .with_export_dir(export_dir)
        .with_layout(
            effective.editor_width.unwrap_or(DEFAULT_EDITOR_WIDTH),
            !effective.no_preview,
        )
        .with_config_paths(
            Some(global_path),
            if local_path.exists() {
                Some(local_path)
            } else {
                None
            },
        );

    app.run().context("Application error")
}
