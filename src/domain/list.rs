//! Task list engine
//!
//! Owns the ordered collection of tasks. Indices exposed to callers are
//! 1-based; an out-of-range index is an error, never a panic. The engine is
//! pure in-memory state; persistence is the caller's concern.

use thiserror::Error;

use super::task::Task;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("No task at index {index}: the list has {len} task(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The ordered task list
///
/// Insertion order is significant and duplicate descriptions are allowed.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list from already-loaded tasks, preserving their order
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the backing slice, for persistence
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Appends a task and returns the new count
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    /// Marks the task at a 1-based index as done
    pub fn mark_done(&mut self, index: usize) -> Result<&Task, ListError> {
        let slot = self.slot(index)?;
        self.tasks[slot].mark_done();
        Ok(&self.tasks[slot])
    }

    /// Marks the task at a 1-based index as not done
    pub fn unmark(&mut self, index: usize) -> Result<&Task, ListError> {
        let slot = self.slot(index)?;
        self.tasks[slot].unmark();
        Ok(&self.tasks[slot])
    }

    /// Removes and returns the task at a 1-based index
    ///
    /// Later tasks shift down by one index.
    pub fn delete(&mut self, index: usize) -> Result<Task, ListError> {
        let slot = self.slot(index)?;
        Ok(self.tasks.remove(slot))
    }

    /// Iterates all tasks with their 1-based indices
    pub fn iter_numbered(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(i, task)| (i + 1, task))
    }

    /// Returns tasks whose description contains the keyword as a literal,
    /// case-sensitive substring, keeping their original 1-based indices
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        self.iter_numbered()
            .filter(|(_, task)| task.description().contains(keyword))
            .collect()
    }

    fn slot(&self, index: usize) -> Result<usize, ListError> {
        if index < 1 || index > self.tasks.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}
