//! Twezopad - A minimal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! twezopad
//! RUST_LOG=twezopad=debug twezopad
//! ```

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use twezopad::app::App;
use twezopad::config::{Settings, log_file_path};

/// A minimal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "twezopad", version, about, long_about = None)]
struct Cli {}

fn open_log_file() -> Option<File> {
    let path = log_file_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn main() -> Result<()> {
    let Cli {} = Cli::parse();

    // Initialize logging; the terminal belongs to the UI, so logs go to a file
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    if let Some(file) = open_log_file() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    }

    // Run the application
    let app = App::new(Settings::default());
    app.run().context("Application error")
}
