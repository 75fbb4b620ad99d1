//! Task domain model
//!
//! A task is a description plus a done flag, specialized by kind: plain
//! todos, deadlines with a due token, and events with a start and end token.
//! Date/time tokens are opaque text, stored and displayed verbatim.

use std::fmt;

use serde::Serialize;

/// Kind-specific fields of a task
///
/// The kind is fixed at construction; there is no transition between kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    Todo,
    Deadline { by: String },
    Event { from: String, to: String },
}

impl TaskKind {
    /// Returns the single-letter tag used in the storage line format
    pub fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

/// A single task in the list
///
/// Only the done flag is mutable after construction, via [`Task::mark_done`]
/// and [`Task::unmark`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    description: String,
    done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl Task {
    /// Creates a new not-done task
    pub fn new(description: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind,
        }
    }

    /// Creates a plain todo
    pub fn todo(description: impl Into<String>) -> Self {
        Self::new(description, TaskKind::Todo)
    }

    /// Creates a deadline with a free-form due token
    pub fn deadline(description: impl Into<String>, by: impl Into<String>) -> Self {
        Self::new(description, TaskKind::Deadline { by: by.into() })
    }

    /// Creates an event with free-form start and end tokens
    pub fn event(
        description: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::new(
            description,
            TaskKind::Event {
                from: from.into(),
                to: to.into(),
            },
        )
    }

    /// Reconstructs a task from persisted state, done flag included
    pub(crate) fn restore(description: String, kind: TaskKind, done: bool) -> Self {
        Self {
            description,
            done,
            kind,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Marks the task as done (idempotent)
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Marks the task as not done (idempotent)
    pub fn unmark(&mut self) {
        self.done = false;
    }

    /// Returns the done-flag character used in the line format
    fn done_flag(&self) -> char {
        if self.done {
            'X'
        } else {
            ' '
        }
    }
}

/// The display line doubles as the storage line; see the codec for the
/// format contract.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.tag(),
            self.done_flag(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by),
            TaskKind::Event { from, to } => write!(f, " (from: {} to: {})", from, to),
        }
    }
}
