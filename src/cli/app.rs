//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::output::{Output, OutputFormat};
use super::session::Session;
use crate::storage::{Config, TaskStore};

#[derive(Parser)]
#[command(name = "taskline")]
#[command(author, version, about = "Console task manager with single-line commands")]
pub struct Cli {
    /// Path of the task file (overrides the config file)
    #[arg(long, env = "TASKLINE_FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_global()?;

    let data_file = config.resolve_data_file(cli.file);
    let store = TaskStore::new(data_file);

    let output = Output::new(
        io::stdout().lock(),
        cli.format,
        cli.verbose,
        config.separator_width(),
    );
    output.verbose(&format!("Task file: {}", store.path().display()));

    let mut session = Session::new(store, output);
    session.run(io::stdin().lock())
}
