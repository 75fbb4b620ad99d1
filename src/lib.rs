//! Taskline - a console task manager
//!
//! Taskline reads single-line commands (`todo`, `deadline`, `event`, `mark`,
//! `delete`, `find`, ...), keeps the task list in memory, and persists it to
//! a flat text file between runs, one task per line.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Command, ListError, ParseError, Task, TaskKind, TaskList};
