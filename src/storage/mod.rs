//! # Storage Layer
//!
//! Persistence for taskline.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | One task per line, custom text format | `./data/tasks.txt` (configurable) |
//! | Config | TOML | `~/.config/taskline/config.toml` |
//!
//! ## Durability
//!
//! Every save rewrites the whole task file atomically (temp file + rename).
//! A missing task file loads as an empty list; lines that fail to decode are
//! skipped and surfaced as diagnostics, never dropped silently.

pub mod codec;
mod config;
mod store;

pub use codec::{decode, encode, DecodeError};
pub use config::{Config, DEFAULT_DATA_FILE};
pub use store::{LoadOutcome, SkippedLine, TaskStore};
