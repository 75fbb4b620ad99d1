//! Output formatting for the session
//!
//! Every command answers with one delimited block in text mode, or one JSON
//! object per line in json mode. Verbose diagnostics go to stderr and never
//! interleave with the command protocol on stdout.

use std::io::{self, Write};

use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output<W: Write> {
    writer: W,
    format: OutputFormat,
    verbose: bool,
    separator: String,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, format: OutputFormat, verbose: bool, separator_width: usize) -> Self {
        Self {
            writer,
            format,
            verbose,
            separator: "_".repeat(separator_width),
        }
    }

    /// Writes one delimited block (text mode only; json callers use `data`)
    pub fn block(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(self.writer, "{}", self.separator)?;
        for line in lines {
            writeln!(self.writer, "{}", line)?;
        }
        writeln!(self.writer, "{}", self.separator)?;
        Ok(())
    }

    /// Writes one JSON object on its own line
    pub fn data<T: Serialize>(&mut self, data: &T) -> io::Result<()> {
        let json = serde_json::to_string(data)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Reports a recoverable error through the command protocol
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.block(&[message.to_string()]),
            OutputFormat::Json => self.data(&serde_json::json!({
                "event": "error",
                "error": message,
            })),
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }
}
