//! Flat-file task store
//!
//! The whole list lives in one UTF-8 text file, one task per line. A missing
//! file loads as zero tasks; lines that fail to decode are collected as
//! diagnostics and skipped without aborting the load. Saves rewrite the
//! whole file atomically (temp file + rename).

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::codec::{self, DecodeError};
use crate::domain::Task;

/// A storage line that failed to decode during load
#[derive(Debug)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
    pub error: DecodeError,
}

/// Everything a load produced: the readable tasks plus the lines it skipped
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedLine>,
}

/// Store for the task list as a flat text file
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Creates a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole list from disk
    pub fn load(&self) -> Result<LoadOutcome> {
        if !self.path.exists() {
            return Ok(LoadOutcome::default());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open task file: {}", self.path.display()))?;

        let reader = BufReader::new(file);
        let mut outcome = LoadOutcome::default();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            match codec::decode(&line) {
                Ok(task) => outcome.tasks.push(task),
                Err(error) => outcome.skipped.push(SkippedLine {
                    line_number: line_num + 1,
                    content: line,
                    error,
                }),
            }
        }

        Ok(outcome)
    }

    /// Writes the whole list to disk (full rewrite)
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("txt.tmp");

        {
            let file = File::create(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(file);
            for task in tasks {
                writeln!(writer, "{}", codec::encode(task)).context("Failed to write task")?;
            }
            writer.flush().context("Failed to flush task file")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}
